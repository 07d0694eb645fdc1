//! Notification lifecycle commands
//! 通知生命周期相关的 Tauri 命令

use tauri::State;
use tracing::{info_span, Instrument};

use kc_core::notification::NotificationPayload;

use crate::bootstrap::ShellServices;
use crate::events::NotificationStateSnapshot;

const TEST_TITLE: &str = "테스트 알림";
const TEST_BODY: &str = "이것은 테스트 알림입니다";

/// Payload used by the status screen's "send test" button.
pub fn default_test_payload() -> NotificationPayload {
    NotificationPayload::new(TEST_TITLE, TEST_BODY)
        .with_data("screen", "details")
        .with_data("id", "123")
}

/// Get the current lifecycle snapshot.
///
/// 获取当前通知生命周期快照。
#[tauri::command]
pub async fn notifications_state_get(
    services: State<'_, ShellServices>,
) -> Result<NotificationStateSnapshot, String> {
    let span = info_span!("command.notifications.state_get");
    async {
        let (phase, state) = services.controller.snapshot().await;
        Ok(NotificationStateSnapshot::new(phase, state))
    }
    .instrument(span)
    .await
}

/// Run a new initialize attempt and return the resulting snapshot.
///
/// 重新执行初始化并返回结果快照。
#[tauri::command]
pub async fn notifications_initialize(
    services: State<'_, ShellServices>,
) -> Result<NotificationStateSnapshot, String> {
    let span = info_span!("command.notifications.initialize");
    async {
        services.controller.initialize().await;
        let (phase, state) = services.controller.snapshot().await;
        Ok(NotificationStateSnapshot::new(phase, state))
    }
    .instrument(span)
    .await
}

/// Show a local test notification. Returns the notification id, or `None`
/// when scheduling failed (the failure lands in the state's `error`).
///
/// 发送本地测试通知。
#[tauri::command]
pub async fn notifications_send_test(
    services: State<'_, ShellServices>,
    payload: Option<NotificationPayload>,
) -> Result<Option<String>, String> {
    let span = info_span!("command.notifications.send_test");
    async {
        let payload = payload.unwrap_or_else(default_test_payload);
        Ok(services.controller.send_test_notification(payload).await)
    }
    .instrument(span)
    .await
}

/// Clear the error field only.
///
/// 仅清除错误信息。
#[tauri::command]
pub async fn notifications_clear_error(services: State<'_, ShellServices>) -> Result<(), String> {
    let span = info_span!("command.notifications.clear_error");
    async {
        services.controller.clear_error().await;
        Ok(())
    }
    .instrument(span)
    .await
}
