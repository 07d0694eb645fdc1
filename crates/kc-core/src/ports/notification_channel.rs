use async_trait::async_trait;

use super::errors::ChannelError;
use crate::notification::ChannelSpec;

/// Platform delivery-channel API.
#[async_trait]
pub trait NotificationChannelPort: Send + Sync {
    /// Whether the platform has a channel concept at all.
    fn supports_channels(&self) -> bool;

    /// Create the channel or update it in place if the id already exists.
    async fn upsert_channel(&self, channel: &ChannelSpec) -> Result<(), ChannelError>;
}
