//! services/dashboard/src/adapters/client_channel.rs
//!
//! Port implementations that forward to a connected WebSocket client through
//! its outbound message channel. The socket writer drains the channel.

use async_trait::async_trait;
use legalvision_core::ports::{
    Clipboard, Navigator, Notification, Notifier, PortError, PortResult,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::web::protocol::ServerMessage;

/// Implements `Notifier`, `Navigator` and `Clipboard` for one client.
#[derive(Clone)]
pub struct ClientChannel {
    outbound: UnboundedSender<ServerMessage>,
}

impl ClientChannel {
    pub fn new(outbound: UnboundedSender<ServerMessage>) -> Self {
        Self { outbound }
    }
}

impl Notifier for ClientChannel {
    fn notify(&self, notification: Notification) {
        if self
            .outbound
            .send(ServerMessage::Notification(notification))
            .is_err()
        {
            debug!("Dropping notification for a disconnected client.");
        }
    }
}

impl Navigator for ClientChannel {
    fn navigate_to(&self, path: &str) {
        if self
            .outbound
            .send(ServerMessage::Navigate {
                path: path.to_string(),
            })
            .is_err()
        {
            debug!("Dropping navigation to {} for a disconnected client.", path);
        }
    }
}

#[async_trait]
impl Clipboard for ClientChannel {
    async fn write_text(&self, content: &str) -> PortResult<()> {
        self.outbound
            .send(ServerMessage::ClipboardWrite {
                content: content.to_string(),
            })
            .map_err(|_| PortError::Unavailable("client disconnected".to_string()))
    }
}
