//! Event Forwarding - Forward lifecycle and notification events to the page
//! 事件转发 - 将生命周期与通知事件转发到页面

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};

use kc_core::lifecycle::{LifecyclePhase, LifecycleState};
use kc_core::notification::{NotificationResponse, ReceivedNotification};

pub const STATE_CHANGED_EVENT: &str = "notifications://state-changed";
pub const RECEIVED_EVENT: &str = "notifications://received";
pub const TAPPED_EVENT: &str = "notifications://tapped";

/// Lifecycle snapshot, emitted on every state change and returned by the
/// state commands
/// 生命周期快照：状态变化时发送，也作为状态命令的返回值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStateSnapshot {
    pub phase: LifecyclePhase,
    #[serde(flatten)]
    pub state: LifecycleState,
}

impl NotificationStateSnapshot {
    pub fn new(phase: LifecyclePhase, state: LifecycleState) -> Self {
        Self { phase, state }
    }
}

/// A tapped notification, reduced to what the page navigates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTappedEvent {
    pub identifier: String,
    pub action_identifier: String,
    pub data: std::collections::BTreeMap<String, String>,
}

impl From<&NotificationResponse> for NotificationTappedEvent {
    fn from(response: &NotificationResponse) -> Self {
        Self {
            identifier: response.notification.identifier.clone(),
            action_identifier: response.action_identifier.clone(),
            data: response.data().clone(),
        }
    }
}

pub fn forward_state_changed<R: Runtime>(
    app: &AppHandle<R>,
    phase: LifecyclePhase,
    state: &LifecycleState,
) -> tauri::Result<()> {
    app.emit(
        STATE_CHANGED_EVENT,
        NotificationStateSnapshot::new(phase, state.clone()),
    )
}

pub fn forward_received<R: Runtime>(
    app: &AppHandle<R>,
    notification: &ReceivedNotification,
) -> tauri::Result<()> {
    app.emit(RECEIVED_EVENT, notification)
}

pub fn forward_tapped<R: Runtime>(
    app: &AppHandle<R>,
    response: &NotificationResponse,
) -> tauri::Result<()> {
    app.emit(TAPPED_EVENT, NotificationTappedEvent::from(response))
}
