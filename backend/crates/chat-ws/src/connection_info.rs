use crate::ConnectionId;

use chrono::{DateTime, Utc};

/// Information about an active delivery connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub connected_at: DateTime<Utc>,
}
