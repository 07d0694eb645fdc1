use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::PushTokenError;
use crate::ids::PushToken;

/// Source of push-delivery tokens scoped to a project.
#[async_trait]
pub trait PushTokenPort: Send + Sync {
    async fn request_token(&self, project_id: &str) -> Result<PushToken, PushTokenError>;
}

/// Kind of native token the OS issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeTokenKind {
    Apns,
    Fcm,
}

/// Raw APNs/FCM device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeDeviceToken {
    pub kind: NativeTokenKind,
    pub value: String,
}

/// Source of the native device token issued by the OS push service.
#[async_trait]
pub trait NativeDeviceTokenPort: Send + Sync {
    /// Resolves once the OS has issued a token. No timeout is applied, but
    /// an implementation that knows no token will ever arrive fails with
    /// [`PushTokenError::NativeTokenUnavailable`].
    async fn device_token(&self) -> Result<NativeDeviceToken, PushTokenError>;
}
