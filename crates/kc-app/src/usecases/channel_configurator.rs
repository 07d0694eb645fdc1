//! Use case for declaring notification delivery channels
//! 声明通知投递渠道的用例

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use kc_core::notification::{default_channels, ChannelSpec};
use kc_core::ports::{ChannelError, NotificationChannelPort};

/// Declares the `default` and `attendance` channels.
///
/// ## Behavior / 行为
/// - No-op on platforms without a channel concept
/// - Upserts by id, so calling it repeatedly leaves the same two channels
pub struct ChannelConfigurator {
    channels: Arc<dyn NotificationChannelPort>,
    specs: Vec<ChannelSpec>,
}

impl ChannelConfigurator {
    pub fn new(channels: Arc<dyn NotificationChannelPort>) -> Self {
        Self {
            channels,
            specs: default_channels(),
        }
    }

    /// Channels this configurator declares.
    pub fn specs(&self) -> &[ChannelSpec] {
        &self.specs
    }

    /// Returns the number of channels upserted (zero when unsupported).
    pub async fn ensure_channels(&self) -> Result<usize, ChannelError> {
        let span = info_span!("usecase.channel_configurator.ensure_channels");

        async {
            if !self.channels.supports_channels() {
                debug!("Platform has no delivery channels, skipping");
                return Ok(0);
            }

            for spec in &self.specs {
                self.channels.upsert_channel(spec).await?;
                debug!(channel_id = %spec.id, "Notification channel declared");
            }

            info!(count = self.specs.len(), "Notification channels ready");
            Ok(self.specs.len())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records channels by id, like the platform does.
    struct RecordingChannels {
        supported: bool,
        channels: Mutex<BTreeMap<String, ChannelSpec>>,
        calls: Mutex<usize>,
    }

    impl RecordingChannels {
        fn new(supported: bool) -> Self {
            Self {
                supported,
                channels: Mutex::new(BTreeMap::new()),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl NotificationChannelPort for RecordingChannels {
        fn supports_channels(&self) -> bool {
            self.supported
        }

        async fn upsert_channel(&self, channel: &ChannelSpec) -> Result<(), ChannelError> {
            *self.calls.lock().unwrap() += 1;
            self.channels
                .lock()
                .unwrap()
                .insert(channel.id.clone(), channel.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_ensure_channels_twice_keeps_two_channels() {
        let port = Arc::new(RecordingChannels::new(true));
        let configurator = ChannelConfigurator::new(port.clone());

        assert_eq!(configurator.ensure_channels().await.unwrap(), 2);
        let first = port.channels.lock().unwrap().clone();
        assert_eq!(configurator.ensure_channels().await.unwrap(), 2);
        let second = port.channels.lock().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(
            second.keys().cloned().collect::<Vec<_>>(),
            vec!["attendance".to_string(), "default".to_string()]
        );
        assert_eq!(*port.calls.lock().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_ensure_channels_is_noop_without_channel_support() {
        let port = Arc::new(RecordingChannels::new(false));
        let configurator = ChannelConfigurator::new(port.clone());

        assert_eq!(configurator.ensure_channels().await.unwrap(), 0);
        assert_eq!(*port.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ensure_channels_propagates_platform_failure() {
        struct Failing;

        #[async_trait]
        impl NotificationChannelPort for Failing {
            fn supports_channels(&self) -> bool {
                true
            }

            async fn upsert_channel(&self, channel: &ChannelSpec) -> Result<(), ChannelError> {
                Err(ChannelError::Create {
                    id: channel.id.clone(),
                    message: "binder died".to_string(),
                })
            }
        }

        let configurator = ChannelConfigurator::new(Arc::new(Failing));
        let err = configurator.ensure_channels().await.unwrap_err();

        assert!(err.to_string().contains("binder died"));
    }
}
