//! Implementations of kc-core ports that need an `AppHandle`.

pub mod lifecycle;
pub mod notification;
pub mod webview;

pub use lifecycle::TauriLifecycleEventEmitter;
pub use notification::{
    TauriNotificationChannels, TauriNotificationPermission, TauriNotificationScheduler,
};
pub use webview::TauriWebviewBridge;
