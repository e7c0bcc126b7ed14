use chat_core::MESSAGE_TOPIC;
use chat_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - component status, 503 when the database is unreachable
pub async fn health(State(state): State<AppState>) -> Response {
    let database_ok = match chat_db::ping(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Health check database ping failed: {}", e);
            false
        }
    };
    let bus_open = !state.bus.is_closed();

    let (status, label) = if database_ok && bus_open {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let database = if database_ok {
        "operational"
    } else {
        "unavailable"
    };
    let websocket = if bus_open { "operational" } else { "closed" };

    let health = json!({
        "status": label,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "websocket": websocket,
        },
        "connections": state.registry.total_count(),
        "subscribers": state.bus.subscriber_count(MESSAGE_TOPIC),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(health)).into_response()
}
