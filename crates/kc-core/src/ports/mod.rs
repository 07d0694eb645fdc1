//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the registration lifecycle to be tested with fakes
//! instead of the notification plugin, the key-value store or the webview.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `kc-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a platform capability?**
//! 2. **Will it be depended upon by multiple use cases?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `kc-core/ports`.
//! Otherwise, keep it next to the use case in `kc-app`.

pub mod app_dirs;
mod clock;
pub mod device_info;
pub mod errors;
pub mod notification_channel;
pub mod notification_events;
pub mod notification_permission;
pub mod notification_scheduler;
pub mod push_token;
pub mod token_store;
pub mod webview_bridge;

pub use app_dirs::AppDirsPort;
pub use clock::*;
pub use device_info::DeviceInfoPort;
pub use errors::{
    AppDirsError, ChannelError, PermissionError, PushTokenError, SchedulerError, TokenStoreError,
    WebviewBridgeError,
};
pub use notification_channel::NotificationChannelPort;
pub use notification_events::{
    NotificationEventsPort, NotificationSubscription, ReceivedCallback, ResponseCallback,
};
pub use notification_permission::NotificationPermissionPort;
pub use notification_scheduler::NotificationSchedulerPort;
pub use push_token::{NativeDeviceToken, NativeDeviceTokenPort, NativeTokenKind, PushTokenPort};
pub use token_store::TokenStorePort;
pub use webview_bridge::WebviewBridgePort;
