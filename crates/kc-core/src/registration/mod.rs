//! Persisted registration record.
//!
//! The token store holds plain strings; this module gives them a typed
//! shape and a schema version so the layout can evolve.

use serde::{Deserialize, Serialize};

use crate::device::DevicePlatform;
use crate::ids::{DeviceId, PushToken};
use crate::notification::DeviceToken;

pub const PUSH_TOKEN_KEY: &str = "expo_push_token";
pub const DEVICE_ID_KEY: &str = "device_id";
pub const PLATFORM_KEY: &str = "platform";
pub const SCHEMA_VERSION_KEY: &str = "registration_schema_version";

/// Current layout of the registration keys.
///
/// v0: the three keys without a version marker.
/// v1: same keys plus `registration_schema_version`.
pub const CURRENT_REGISTRATION_SCHEMA_VERSION: u32 = 1;

/// Last-written `{platform, device_id, token}` triple.
///
/// Fields are optional because the three writes are independent: a crash
/// between writes leaves a partial record, which readers must tolerate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRegistration {
    pub platform: Option<DevicePlatform>,
    pub device_id: Option<DeviceId>,
    pub token: Option<PushToken>,
}

impl PersistedRegistration {
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.device_id.is_none() && self.token.is_none()
    }

    /// The full record, if every field was written.
    pub fn complete(&self) -> Option<DeviceToken> {
        match (&self.token, self.platform, &self.device_id) {
            (Some(token), Some(platform), Some(device_id)) => Some(DeviceToken::new(
                token.clone(),
                platform,
                device_id.clone(),
            )),
            _ => None,
        }
    }
}

impl From<&DeviceToken> for PersistedRegistration {
    fn from(token: &DeviceToken) -> Self {
        Self {
            platform: Some(token.platform()),
            device_id: Some(token.device_id().clone()),
            token: Some(token.token().clone()),
        }
    }
}
