use async_trait::async_trait;

use super::errors::WebviewBridgeError;
use crate::handshake::StartupMessage;

/// One-way channel into the embedded browser view.
///
/// Delivery is fire-and-forget: no acknowledgement, no retry.
#[async_trait]
pub trait WebviewBridgePort: Send + Sync {
    async fn post_startup_message(&self, message: &StartupMessage)
        -> Result<(), WebviewBridgeError>;
}
