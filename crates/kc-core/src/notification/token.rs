use serde::{Deserialize, Serialize};

use crate::device::DevicePlatform;
use crate::ids::{DeviceId, PushToken};

/// Result of a successful token acquisition.
///
/// Immutable once created; a later acquisition supersedes it rather than
/// mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    token: PushToken,
    platform: DevicePlatform,
    device_id: DeviceId,
}

impl DeviceToken {
    pub fn new(token: PushToken, platform: DevicePlatform, device_id: DeviceId) -> Self {
        Self {
            token,
            platform,
            device_id,
        }
    }

    pub fn token(&self) -> &PushToken {
        &self.token
    }

    pub fn platform(&self) -> DevicePlatform {
        self.platform
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }
}
