use anyhow::Result;

use kc_core::lifecycle::{LifecyclePhase, LifecycleState};
use kc_core::notification::{NotificationResponse, ReceivedNotification};

/// Outbound notifications from the lifecycle controller to the host.
///
/// 控制器向宿主推送的事件。
///
/// Implementations must not block: they are called while the controller
/// holds its state lock.
pub trait LifecycleEventEmitter: Send + Sync {
    fn emit_state_changed(&self, phase: LifecyclePhase, state: &LifecycleState) -> Result<()>;

    fn emit_received(&self, notification: &ReceivedNotification) -> Result<()>;

    fn emit_tapped(&self, response: &NotificationResponse) -> Result<()>;
}

/// Emitter that drops everything.
pub struct NoopLifecycleEventEmitter;

impl LifecycleEventEmitter for NoopLifecycleEventEmitter {
    fn emit_state_changed(&self, _phase: LifecyclePhase, _state: &LifecycleState) -> Result<()> {
        Ok(())
    }

    fn emit_received(&self, _notification: &ReceivedNotification) -> Result<()> {
        Ok(())
    }

    fn emit_tapped(&self, _response: &NotificationResponse) -> Result<()> {
        Ok(())
    }
}
