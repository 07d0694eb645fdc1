//! Use case for posting the startup message into the browser view
//! 向内嵌网页发送启动消息的用例

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use kc_core::handshake::StartupMessage;
use kc_core::ids::DeviceId;
use kc_core::lifecycle::LifecyclePhase;
use kc_core::ports::{ClockPort, DeviceInfoPort, WebviewBridgePort};

use super::RegistrationStore;

/// Sends one [`StartupMessage`] per page load, once the token pipeline has
/// settled, after a fixed delay.
///
/// The identity comes from the persisted registration when there is one,
/// otherwise from the installation's device id, so a device id is always
/// available by the time the message is built.
pub struct StartupHandshake {
    registrations: Arc<RegistrationStore>,
    device_info: Arc<dyn DeviceInfoPort>,
    device_id: DeviceId,
    clock: Arc<dyn ClockPort>,
    bridge: Arc<dyn WebviewBridgePort>,
    delay: Duration,
    pipeline: Option<watch::Receiver<LifecyclePhase>>,
}

impl StartupHandshake {
    pub fn new(
        registrations: Arc<RegistrationStore>,
        device_info: Arc<dyn DeviceInfoPort>,
        device_id: DeviceId,
        clock: Arc<dyn ClockPort>,
        bridge: Arc<dyn WebviewBridgePort>,
        delay: Duration,
    ) -> Self {
        Self {
            registrations,
            device_info,
            device_id,
            clock,
            bridge,
            delay,
            pipeline: None,
        }
    }

    /// Hold each message until `phases` reports a settled phase
    /// (`Ready` or `Failed`).
    pub fn with_pipeline(mut self, phases: watch::Receiver<LifecyclePhase>) -> Self {
        self.pipeline = Some(phases);
        self
    }

    /// Called when the view reports that a page finished loading: waits for
    /// the token pipeline, then for the configured delay, then posts the
    /// message. Delivery failures are logged and dropped.
    pub async fn page_loaded(&self, url: &str) {
        let span = info_span!("usecase.startup_handshake.page_loaded", url = %url);
        async {
            self.wait_for_pipeline().await;
            tokio::time::sleep(self.delay).await;
            self.post().await;
        }
        .instrument(span)
        .await
    }

    async fn wait_for_pipeline(&self) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        let mut phases = pipeline.clone();
        match phases.wait_for(|phase| phase.is_settled()).await.map(|phase| *phase) {
            Ok(phase) => debug!(?phase, "Token pipeline settled"),
            Err(_) => debug!("Token pipeline closed, posting without waiting"),
        }
    }

    /// Build the message from the current registration.
    pub async fn build_message(&self) -> StartupMessage {
        let registration = match self.registrations.load().await {
            Ok(registration) => registration.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "Failed to read registration for startup message");
                Default::default()
            }
        };

        let now_ms = self.clock.now_ms();
        let device_id = registration
            .device_id
            .unwrap_or_else(|| self.device_id.clone());
        let platform = registration
            .platform
            .unwrap_or_else(|| self.device_info.platform());

        StartupMessage::new(&device_id, platform, registration.token.as_ref(), now_ms)
    }

    async fn post(&self) {
        let message = self.build_message().await;
        debug!(device_id = %message.device_id, "Posting startup message");

        match self.bridge.post_startup_message(&message).await {
            Ok(()) => info!(
                device_id = %message.device_id,
                has_token = message.push_token.is_some(),
                "Startup message posted"
            ),
            Err(err) => warn!(error = %err, "Failed to post startup message"),
        }
    }
}
