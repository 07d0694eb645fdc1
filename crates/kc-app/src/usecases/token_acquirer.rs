//! Use case for acquiring a push-delivery token
//! 获取推送令牌的用例

use std::sync::Arc;

use tracing::{error, info, info_span, Instrument};

use kc_core::ids::DeviceId;
use kc_core::lifecycle::NotificationUnavailable;
use kc_core::notification::DeviceToken;
use kc_core::ports::{DeviceInfoPort, PushTokenPort};

use super::PermissionGate;

/// Why no token was produced.
///
/// 未能获取令牌的原因。
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    /// Expected outcome on emulators or when permission is denied.
    #[error(transparent)]
    Unavailable(#[from] NotificationUnavailable),
    /// A permission, channel or token platform call failed.
    #[error("{0}")]
    Platform(String),
}

/// Pick a device identifier: stable id, then build id, then model name,
/// then a timestamp-seeded synthetic id. Blank candidates are skipped.
pub fn derive_device_id(device_info: &dyn DeviceInfoPort, now_ms: i64) -> DeviceId {
    [
        device_info.stable_identifier(),
        device_info.build_identifier(),
        device_info.model_name(),
    ]
    .into_iter()
    .flatten()
    .find_map(|candidate| DeviceId::parse(&candidate))
    .unwrap_or_else(|| DeviceId::synthetic(now_ms))
}

/// Produces a [`DeviceToken`] once permission is granted.
///
/// `device_id` is resolved once by the caller with [`derive_device_id`] and
/// shared with every other component that reports this installation.
pub struct TokenAcquirer {
    gate: Arc<PermissionGate>,
    push_tokens: Arc<dyn PushTokenPort>,
    device_info: Arc<dyn DeviceInfoPort>,
    device_id: DeviceId,
}

impl TokenAcquirer {
    pub fn new(
        gate: Arc<PermissionGate>,
        push_tokens: Arc<dyn PushTokenPort>,
        device_info: Arc<dyn DeviceInfoPort>,
        device_id: DeviceId,
    ) -> Self {
        Self {
            gate,
            push_tokens,
            device_info,
            device_id,
        }
    }

    /// Execute the use case.
    ///
    /// # Returns / 返回值
    /// - `Ok(DeviceToken)` with a token scoped to `project_id`
    /// - `Err(AcquireError::Unavailable)` when the gate did not grant
    /// - `Err(AcquireError::Platform)` when a platform call failed
    pub async fn acquire(&self, project_id: &str) -> Result<DeviceToken, AcquireError> {
        let span = info_span!("usecase.token_acquirer.acquire", project_id = %project_id);

        async {
            let outcome = self.gate.ensure_granted().await.map_err(|err| {
                error!(error = %err, "Permission check failed");
                AcquireError::Platform(err.to_string())
            })?;

            if let Some(reason) = outcome.unavailable_reason() {
                return Err(AcquireError::Unavailable(reason));
            }

            let token = self
                .push_tokens
                .request_token(project_id)
                .await
                .map_err(|err| {
                    error!(error = %err, "Push token request failed");
                    AcquireError::Platform(err.to_string())
                })?;

            let device_id = self.device_id.clone();
            let platform = self.device_info.platform();

            info!(
                token = ?token,
                device_id = %device_id,
                platform = %platform,
                "Push token acquired"
            );

            Ok(DeviceToken::new(token, platform, device_id))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kc_core::device::DevicePlatform;
    use kc_core::ids::PushToken;
    use kc_core::notification::{ChannelSpec, PermissionStatus};
    use kc_core::ports::{
        ChannelError, NotificationChannelPort, NotificationPermissionPort, PermissionError,
        PushTokenError,
    };
    use std::sync::Mutex;

    use crate::usecases::ChannelConfigurator;

    #[derive(Clone, Default)]
    struct FakeDevice {
        physical: bool,
        stable: Option<String>,
        build: Option<String>,
        model: Option<String>,
    }

    impl DeviceInfoPort for FakeDevice {
        fn is_physical_device(&self) -> bool {
            self.physical
        }

        fn platform(&self) -> DevicePlatform {
            DevicePlatform::Ios
        }

        fn stable_identifier(&self) -> Option<String> {
            self.stable.clone()
        }

        fn build_identifier(&self) -> Option<String> {
            self.build.clone()
        }

        fn model_name(&self) -> Option<String> {
            self.model.clone()
        }
    }

    struct Granted;

    #[async_trait]
    impl NotificationPermissionPort for Granted {
        async fn current_status(&self) -> Result<PermissionStatus, PermissionError> {
            Ok(PermissionStatus::Granted)
        }

        async fn request(&self) -> Result<PermissionStatus, PermissionError> {
            Ok(PermissionStatus::Granted)
        }
    }

    struct NoChannels;

    #[async_trait]
    impl NotificationChannelPort for NoChannels {
        fn supports_channels(&self) -> bool {
            false
        }

        async fn upsert_channel(&self, _channel: &ChannelSpec) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    struct FakePushTokens {
        result: Result<&'static str, &'static str>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PushTokenPort for FakePushTokens {
        async fn request_token(&self, project_id: &str) -> Result<PushToken, PushTokenError> {
            self.requested.lock().unwrap().push(project_id.to_string());
            self.result
                .map(PushToken::from)
                .map_err(|msg| PushTokenError::Gateway(msg.to_string()))
        }
    }

    fn acquirer(
        device: FakeDevice,
        result: Result<&'static str, &'static str>,
    ) -> (TokenAcquirer, Arc<FakePushTokens>) {
        let device = Arc::new(device);
        let gate = Arc::new(PermissionGate::new(
            device.clone(),
            Arc::new(Granted),
            Arc::new(ChannelConfigurator::new(Arc::new(NoChannels))),
        ));
        let push_tokens = Arc::new(FakePushTokens {
            result,
            requested: Mutex::new(Vec::new()),
        });
        let device_id = derive_device_id(device.as_ref(), 1_700_000_000_000);
        let acquirer = TokenAcquirer::new(gate, push_tokens.clone(), device, device_id);
        (acquirer, push_tokens)
    }

    #[tokio::test]
    async fn test_acquire_scopes_request_to_project() {
        let device = FakeDevice {
            physical: true,
            build: Some("17A5305f".to_string()),
            ..Default::default()
        };
        let (acquirer, push_tokens) = acquirer(device, Ok("tok-abc123"));

        let token = acquirer.acquire("proj-1").await.unwrap();

        assert_eq!(token.token().as_str(), "tok-abc123");
        assert_eq!(token.device_id().as_str(), "17A5305f");
        assert_eq!(token.platform(), DevicePlatform::Ios);
        assert_eq!(*push_tokens.requested.lock().unwrap(), vec!["proj-1"]);
    }

    #[tokio::test]
    async fn test_acquire_on_emulator_is_unavailable_without_token_request() {
        let (acquirer, push_tokens) = acquirer(FakeDevice::default(), Ok("tok"));

        let err = acquirer.acquire("proj-1").await.unwrap_err();

        assert!(matches!(
            err,
            AcquireError::Unavailable(NotificationUnavailable::IneligibleDevice)
        ));
        assert!(push_tokens.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_failure_is_platform_error_with_message() {
        let device = FakeDevice {
            physical: true,
            ..Default::default()
        };
        let (acquirer, _) = acquirer(device, Err("gateway timeout"));

        let err = acquirer.acquire("proj-1").await.unwrap_err();

        match err {
            AcquireError::Platform(message) => assert!(message.contains("gateway timeout")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_synthetic_device_id_is_stable_across_attempts() {
        let device = FakeDevice {
            physical: true,
            ..Default::default()
        };
        let (acquirer, _) = acquirer(device, Ok("tok"));

        let first = acquirer.acquire("proj-1").await.unwrap();
        let second = acquirer.acquire("proj-1").await.unwrap();

        assert_eq!(first.device_id().as_str(), "device-1700000000000");
        assert_eq!(first.device_id(), second.device_id());
    }

    #[test]
    fn test_device_id_is_never_empty() {
        let candidates = [None, Some(""), Some("   "), Some("id")];

        for stable in candidates {
            for build in candidates {
                for model in candidates {
                    let device = FakeDevice {
                        physical: true,
                        stable: stable.map(str::to_string),
                        build: build.map(str::to_string),
                        model: model.map(str::to_string),
                    };

                    let id = derive_device_id(&device, 42);

                    assert!(!id.as_str().trim().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_device_id_fallback_order() {
        let mut device = FakeDevice {
            physical: true,
            stable: Some("stable".to_string()),
            build: Some("build".to_string()),
            model: Some("model".to_string()),
        };
        assert_eq!(derive_device_id(&device, 1).as_str(), "stable");

        device.stable = Some(" ".to_string());
        assert_eq!(derive_device_id(&device, 1).as_str(), "build");

        device.build = None;
        assert_eq!(derive_device_id(&device, 1).as_str(), "model");

        device.model = None;
        assert_eq!(derive_device_id(&device, 1234).as_str(), "device-1234");
    }
}
