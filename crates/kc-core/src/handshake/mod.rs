//! Startup message posted into the embedded browser view.

use serde::{Deserialize, Serialize};

use crate::device::DevicePlatform;
use crate::ids::{DeviceId, PushToken};

/// Payload the remote site receives once the view has loaded and a
/// device identifier is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupMessage {
    pub device_id: String,
    pub platform: String,
    pub push_token: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl StartupMessage {
    pub fn new(
        device_id: &DeviceId,
        platform: DevicePlatform,
        push_token: Option<&PushToken>,
        timestamp: i64,
    ) -> Self {
        Self {
            device_id: device_id.as_str().to_string(),
            platform: platform.to_string(),
            push_token: push_token.map(|t| t.as_str().to_string()),
            timestamp,
        }
    }
}
