use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info};

use kc_core::ports::{NativeDeviceToken, NativeDeviceTokenPort, PushTokenError};

/// Hand-off point for the native device token.
///
/// The OS delivers the APNs/FCM token to the native layer asynchronously;
/// the native layer reports it here and every pending or later
/// [`NativeDeviceTokenPort::device_token`] call resolves with it.
///
/// Requests made before any producer is attached fail immediately with
/// [`PushTokenError::NativeTokenUnavailable`]; only an attached producer
/// makes them wait for the report.
///
/// 原生层上报设备令牌的汇合点。
#[derive(Debug)]
pub struct NativeTokenRelay {
    tx: watch::Sender<Option<NativeDeviceToken>>,
    producer_attached: AtomicBool,
}

impl Default for NativeTokenRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTokenRelay {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx,
            producer_attached: AtomicBool::new(false),
        }
    }

    /// Announce a native component that will report a token later.
    pub fn attach_producer(&self) {
        if !self.producer_attached.swap(true, Ordering::SeqCst) {
            info!("Native device token producer attached");
        }
    }

    pub fn has_producer(&self) -> bool {
        self.producer_attached.load(Ordering::SeqCst)
    }

    /// Record a token issued by the OS. A later report replaces the earlier
    /// one. Reporting implies an attached producer.
    pub fn report(&self, token: NativeDeviceToken) {
        info!(kind = ?token.kind, "Native device token reported");
        self.producer_attached.store(true, Ordering::SeqCst);
        self.tx.send_replace(Some(token));
    }

    pub fn current(&self) -> Option<NativeDeviceToken> {
        self.tx.borrow().clone()
    }
}

#[async_trait]
impl NativeDeviceTokenPort for NativeTokenRelay {
    async fn device_token(&self) -> Result<NativeDeviceToken, PushTokenError> {
        let mut rx = self.tx.subscribe();
        if rx.borrow().is_none() {
            if !self.has_producer() {
                return Err(PushTokenError::NativeTokenUnavailable(
                    "no native push token producer is attached".to_string(),
                ));
            }
            debug!("Waiting for native device token");
        }
        let token = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|e| PushTokenError::NativeTokenUnavailable(e.to_string()))?;

        token
            .clone()
            .ok_or_else(|| PushTokenError::NativeTokenUnavailable("token missing".to_string()))
    }
}
