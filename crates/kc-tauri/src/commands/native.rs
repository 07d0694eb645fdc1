//! Commands the native layer calls to hand OS events to the shell.
//!
//! 原生层调用的命令：上报设备令牌与通知事件。

use tauri::State;
use tracing::{debug, info, info_span, Instrument};

use kc_core::lifecycle::LifecyclePhase;
use kc_core::notification::{NotificationResponse, ReceivedNotification};
use kc_core::ports::NativeDeviceToken;

use crate::bootstrap::ShellServices;

/// Report the APNs/FCM token issued by the OS.
///
/// A token that arrives after an attempt already failed for lack of one
/// starts a fresh attempt in the background.
#[tauri::command]
pub async fn push_native_token_report(
    services: State<'_, ShellServices>,
    token: NativeDeviceToken,
) -> Result<(), String> {
    let span = info_span!("command.native.token_report", kind = ?token.kind);
    async {
        if relay_native_token(&services, token).await? {
            let controller = services.controller.clone();
            tauri::async_runtime::spawn(async move {
                controller.initialize().await;
            });
        }
        Ok(())
    }
    .instrument(span)
    .await
}

/// Hand the token to the relay. Returns `true` when the last attempt
/// already failed and should be retried now that a token exists.
pub(crate) async fn relay_native_token(
    services: &ShellServices,
    token: NativeDeviceToken,
) -> Result<bool, String> {
    if token.value.trim().is_empty() {
        return Err("native device token is empty".to_string());
    }
    services.native_tokens.report(token);

    let retry = services.controller.phase().await == LifecyclePhase::Failed;
    if retry {
        info!("Native token arrived after a failed attempt, retrying");
    }
    Ok(retry)
}

/// A notification arrived while the app is in the foreground.
/// Returns the number of listeners that saw it.
#[tauri::command]
pub async fn notification_received(
    services: State<'_, ShellServices>,
    notification: ReceivedNotification,
) -> Result<usize, String> {
    let span = info_span!(
        "command.native.notification_received",
        identifier = %notification.identifier
    );
    async {
        let delivered = services.events.dispatch_received(notification);
        debug!(delivered, "Foreground notification dispatched");
        Ok(delivered)
    }
    .instrument(span)
    .await
}

/// The user interacted with a delivered notification.
#[tauri::command]
pub async fn notification_response(
    services: State<'_, ShellServices>,
    response: NotificationResponse,
) -> Result<usize, String> {
    let span = info_span!(
        "command.native.notification_response",
        identifier = %response.notification.identifier
    );
    async {
        let delivered = services.events.dispatch_response(response);
        debug!(delivered, "Notification response dispatched");
        Ok(delivered)
    }
    .instrument(span)
    .await
}
