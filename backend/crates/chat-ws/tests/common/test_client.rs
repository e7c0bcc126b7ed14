use chat_ws::DISPLAY_MESSAGES_PATH;

use std::time::Duration;

use axum_test::{TestServer, TestWebSocket, WsMessage};
use tokio::time::{Instant, timeout_at};

/// Delivery channel test client wrapper
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server
            .get_websocket(DISPLAY_MESSAGES_PATH)
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    /// Fail if a text frame arrives within `window`. Control frames are skipped.
    pub async fn assert_no_text_within(&mut self, window: Duration) {
        let deadline = Instant::now() + window;
        loop {
            match timeout_at(deadline, self.ws.receive_message()).await {
                Err(_) => return,
                Ok(WsMessage::Text(text)) => panic!("Unexpected text frame: {:?}", text),
                Ok(_) => continue,
            }
        }
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server).await);
    }
    clients
}
