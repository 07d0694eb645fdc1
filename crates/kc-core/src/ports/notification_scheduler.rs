use async_trait::async_trait;

use super::errors::SchedulerError;
use crate::notification::NotificationRequest;

/// Local notification scheduling API.
#[async_trait]
pub trait NotificationSchedulerPort: Send + Sync {
    /// Schedule a notification and return its identifier.
    async fn schedule(&self, request: &NotificationRequest) -> Result<String, SchedulerError>;
}
