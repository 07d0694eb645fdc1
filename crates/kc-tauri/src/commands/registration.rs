//! Registration status command
//! 设备注册信息命令

use serde::Serialize;
use tauri::State;
use tracing::{info_span, Instrument};

use kc_core::registration::PersistedRegistration;

use crate::bootstrap::ShellServices;
use crate::commands::map_err;

const UNKNOWN: &str = "Unknown";
const NOT_SET: &str = "Not set";

/// Persisted registration as the status screen displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistrationDto {
    pub platform: String,
    pub device_id: String,
    pub push_token: String,
}

impl From<Option<PersistedRegistration>> for DeviceRegistrationDto {
    fn from(registration: Option<PersistedRegistration>) -> Self {
        let registration = registration.unwrap_or_default();
        Self {
            platform: registration
                .platform
                .map(|p| p.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            device_id: registration
                .device_id
                .map(|id| id.into_inner())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            push_token: registration
                .token
                .map(|t| t.into_inner())
                .unwrap_or_else(|| NOT_SET.to_string()),
        }
    }
}

/// Read the persisted registration triple.
///
/// 读取已持久化的注册信息。
#[tauri::command]
pub async fn device_registration_get(
    services: State<'_, ShellServices>,
) -> Result<DeviceRegistrationDto, String> {
    let span = info_span!("command.registration.get");
    async {
        let registration = services
            .registrations
            .load()
            .await
            .map_err(|e| map_err(e.into()))?;
        Ok(DeviceRegistrationDto::from(registration))
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_core::device::DevicePlatform;
    use kc_core::ids::{DeviceId, PushToken};

    #[test]
    fn missing_registration_uses_placeholders() {
        let dto = DeviceRegistrationDto::from(None);

        assert_eq!(dto.platform, "Unknown");
        assert_eq!(dto.device_id, "Unknown");
        assert_eq!(dto.push_token, "Not set");
    }

    #[test]
    fn partial_registration_fills_only_missing_fields() {
        let dto = DeviceRegistrationDto::from(Some(PersistedRegistration {
            platform: Some(DevicePlatform::Android),
            device_id: Some(DeviceId::parse("TQ3A.230805.001").unwrap()),
            token: None,
        }));

        assert_eq!(dto.platform, "android");
        assert_eq!(dto.device_id, "TQ3A.230805.001");
        assert_eq!(dto.push_token, "Not set");
    }

    #[test]
    fn complete_registration_is_shown_verbatim() {
        let dto = DeviceRegistrationDto::from(Some(PersistedRegistration {
            platform: Some(DevicePlatform::Ios),
            device_id: Some(DeviceId::parse("iPhone15,2").unwrap()),
            token: Some(PushToken::new("ExponentPushToken[abc]")),
        }));

        assert_eq!(dto.push_token, "ExponentPushToken[abc]");
    }
}
