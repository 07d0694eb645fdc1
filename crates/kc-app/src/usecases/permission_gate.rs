//! Use case for resolving notification permission
//! 解析通知权限的用例

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use kc_core::lifecycle::NotificationUnavailable;
use kc_core::ports::{ChannelError, DeviceInfoPort, NotificationPermissionPort, PermissionError};

use super::ChannelConfigurator;

/// Result of the permission check.
///
/// 权限检查结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    /// Not a physical device; no prompt was shown.
    IneligibleDevice,
    /// The final status after at most one prompt was not granted.
    Denied,
}

impl PermissionOutcome {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Why notifications are unavailable, or `None` when granted.
    pub fn unavailable_reason(self) -> Option<NotificationUnavailable> {
        match self {
            Self::Granted => None,
            Self::IneligibleDevice => Some(NotificationUnavailable::IneligibleDevice),
            Self::Denied => Some(NotificationUnavailable::PermissionDenied),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PermissionGateError {
    #[error(transparent)]
    Permission(#[from] PermissionError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Ensures notification permission before a token is requested.
///
/// ## Behavior / 行为
/// - Emulators and simulators are rejected before any prompt
/// - Prompts at most once when the current status is not granted
/// - Declares delivery channels only once permission is granted
pub struct PermissionGate {
    device_info: Arc<dyn DeviceInfoPort>,
    permission: Arc<dyn NotificationPermissionPort>,
    channels: Arc<ChannelConfigurator>,
}

impl PermissionGate {
    pub fn new(
        device_info: Arc<dyn DeviceInfoPort>,
        permission: Arc<dyn NotificationPermissionPort>,
        channels: Arc<ChannelConfigurator>,
    ) -> Self {
        Self {
            device_info,
            permission,
            channels,
        }
    }

    pub async fn ensure_granted(&self) -> Result<PermissionOutcome, PermissionGateError> {
        let span = info_span!("usecase.permission_gate.ensure_granted");

        async {
            if !self.device_info.is_physical_device() {
                warn!("Push notifications require a physical device");
                return Ok(PermissionOutcome::IneligibleDevice);
            }

            let mut status = self.permission.current_status().await?;
            if !status.is_granted() {
                info!(?status, "Requesting notification permission");
                status = self.permission.request().await?;
            }

            if !status.is_granted() {
                warn!(?status, "Notification permission not granted");
                return Ok(PermissionOutcome::Denied);
            }

            self.channels.ensure_channels().await?;
            Ok(PermissionOutcome::Granted)
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
    use kc_core::notification::{ChannelSpec, PermissionStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    mockall::mock! {
        pub Permission {}

        #[async_trait]
        impl NotificationPermissionPort for Permission {
            async fn current_status(&self) -> Result<PermissionStatus, PermissionError>;
            async fn request(&self) -> Result<PermissionStatus, PermissionError>;
        }
    }

    struct FakeDevice {
        physical: bool,
    }

    impl DeviceInfoPort for FakeDevice {
        fn is_physical_device(&self) -> bool {
            self.physical
        }

        fn platform(&self) -> DevicePlatform {
            DevicePlatform::Android
        }

        fn stable_identifier(&self) -> Option<String> {
            None
        }

        fn build_identifier(&self) -> Option<String> {
            None
        }

        fn model_name(&self) -> Option<String> {
            None
        }
    }

    #[derive(Default)]
    struct CountingChannels {
        upserts: AtomicUsize,
    }

    #[async_trait]
    impl kc_core::ports::NotificationChannelPort for CountingChannels {
        fn supports_channels(&self) -> bool {
            true
        }

        async fn upsert_channel(&self, _channel: &ChannelSpec) -> Result<(), ChannelError> {
            self.upserts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn gate(
        physical: bool,
        permission: MockPermission,
    ) -> (PermissionGate, Arc<CountingChannels>) {
        let channels = Arc::new(CountingChannels::default());
        let gate = PermissionGate::new(
            Arc::new(FakeDevice { physical }),
            Arc::new(permission),
            Arc::new(ChannelConfigurator::new(channels.clone())),
        );
        (gate, channels)
    }

    #[tokio::test]
    async fn test_emulator_is_ineligible_without_prompt() {
        let mut permission = MockPermission::new();
        permission.expect_current_status().never();
        permission.expect_request().never();
        let (gate, channels) = gate(false, permission);

        let outcome = gate.ensure_granted().await.unwrap();

        assert_eq!(outcome, PermissionOutcome::IneligibleDevice);
        assert!(!outcome.is_granted());
        assert_eq!(channels.upserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_already_granted_skips_prompt_and_declares_channels() {
        let mut permission = MockPermission::new();
        permission
            .expect_current_status()
            .times(1)
            .returning(|| Ok(PermissionStatus::Granted));
        permission.expect_request().never();
        let (gate, channels) = gate(true, permission);

        assert!(gate.ensure_granted().await.unwrap().is_granted());
        assert_eq!(channels.upserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_prompts_once_when_undetermined() {
        let mut permission = MockPermission::new();
        permission
            .expect_current_status()
            .times(1)
            .returning(|| Ok(PermissionStatus::Undetermined));
        permission
            .expect_request()
            .times(1)
            .returning(|| Ok(PermissionStatus::Granted));
        let (gate, _) = gate(true, permission);

        assert_eq!(
            gate.ensure_granted().await.unwrap(),
            PermissionOutcome::Granted
        );
    }

    #[tokio::test]
    async fn test_rejected_prompt_is_denied_without_channels() {
        let mut permission = MockPermission::new();
        permission
            .expect_current_status()
            .returning(|| Ok(PermissionStatus::Undetermined));
        permission
            .expect_request()
            .times(1)
            .returning(|| Ok(PermissionStatus::Denied));
        let (gate, channels) = gate(true, permission);

        let outcome = gate.ensure_granted().await.unwrap();

        assert_eq!(outcome, PermissionOutcome::Denied);
        assert_eq!(
            outcome.unavailable_reason(),
            Some(NotificationUnavailable::PermissionDenied)
        );
        assert_eq!(channels.upserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_platform_failure_is_an_error() {
        let mut permission = MockPermission::new();
        permission
            .expect_current_status()
            .returning(|| Err(PermissionError::Query("bridge unavailable".to_string())));
        let (gate, _) = gate(true, permission);

        let err = gate.ensure_granted().await.unwrap_err();

        assert!(matches!(err, PermissionGateError::Permission(_)));
    }
}
