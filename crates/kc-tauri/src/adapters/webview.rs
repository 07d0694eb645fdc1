use async_trait::async_trait;
use tauri::{AppHandle, Manager, Runtime};
use tracing::debug;

use kc_core::handshake::StartupMessage;
use kc_core::ports::{WebviewBridgeError, WebviewBridgePort};

/// Label of the window that hosts the remote site.
pub const MAIN_WEBVIEW_LABEL: &str = "main";

/// Build the script that dispatches `message` as a `MessageEvent` inside
/// the page. The payload is a JSON object literal, so `event.data` is an
/// object on the page side.
pub fn post_message_script(message: &StartupMessage) -> Result<String, WebviewBridgeError> {
    let json =
        serde_json::to_string(message).map_err(|e| WebviewBridgeError::Encode(e.to_string()))?;
    Ok(format!("window.postMessage({json}, '*');"))
}

/// Posts startup messages into a webview window by evaluating a script.
pub struct TauriWebviewBridge<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> TauriWebviewBridge<R> {
    pub fn new(app: AppHandle<R>, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }
}

#[async_trait]
impl<R: Runtime> WebviewBridgePort for TauriWebviewBridge<R> {
    async fn post_startup_message(
        &self,
        message: &StartupMessage,
    ) -> Result<(), WebviewBridgeError> {
        let window = self
            .app
            .get_webview_window(&self.label)
            .ok_or_else(|| WebviewBridgeError::WebviewMissing(self.label.clone()))?;

        let script = post_message_script(message)?;
        window
            .eval(&script)
            .map_err(|e| WebviewBridgeError::Post(e.to_string()))?;

        debug!(label = %self.label, "Startup message evaluated in webview");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_core::device::DevicePlatform;
    use kc_core::ids::{DeviceId, PushToken};

    #[test]
    fn test_script_embeds_message_as_object_literal() {
        let message = StartupMessage::new(
            &DeviceId::parse("dev-1").unwrap(),
            DevicePlatform::Ios,
            Some(&PushToken::new("tok-abc123")),
            1_700_000_000_000,
        );

        let script = post_message_script(&message).unwrap();

        assert!(script.starts_with("window.postMessage({"));
        assert!(script.ends_with("}, '*');"));
        assert!(script.contains(r#""deviceId":"dev-1""#));
        assert!(script.contains(r#""pushToken":"tok-abc123""#));
    }

    #[test]
    fn test_script_escapes_quotes_in_values() {
        let message = StartupMessage::new(
            &DeviceId::parse("it's \"quoted\"").unwrap(),
            DevicePlatform::Android,
            None,
            1,
        );

        let script = post_message_script(&message).unwrap();

        assert!(script.contains(r#""deviceId":"it's \"quoted\"""#));
        assert!(script.contains(r#""pushToken":null"#));
    }

    #[tokio::test]
    async fn test_missing_window_is_reported() {
        let app = tauri::test::mock_app();
        let bridge = TauriWebviewBridge::new(app.handle().clone(), MAIN_WEBVIEW_LABEL);
        let message = StartupMessage::new(
            &DeviceId::parse("dev-1").unwrap(),
            DevicePlatform::Other,
            None,
            1,
        );

        let err = bridge.post_startup_message(&message).await.unwrap_err();

        assert!(matches!(err, WebviewBridgeError::WebviewMissing(label) if label == "main"));
    }
}
