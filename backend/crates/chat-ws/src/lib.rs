pub mod app_state;
pub mod broadcast_config;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod delivery_connection;
pub mod error;
pub mod message_bus;
pub mod message_relay;
pub mod message_validator;
pub mod metrics;
pub mod registration;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscription;
pub mod subscription_handle;

pub use app_state::{AppState, handler};
pub use broadcast_config::BroadcastConfig;
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use delivery_connection::DeliveryConnection;
pub use error::{Result, WsError};
pub use message_bus::MessageBus;
pub use message_relay::MessageRelay;
pub use message_validator::MessageValidator;
pub use metrics::Metrics;
pub use registration::Registration;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscription::Subscription;
pub use subscription_handle::SubscriptionHandle;


/// Path of the push-only delivery channel
pub const DISPLAY_MESSAGES_PATH: &str = "/display-messages";
