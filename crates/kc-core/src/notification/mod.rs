//! Notification domain models.
//!
//! 通知领域模型：令牌、本地通知内容、投递通道与权限状态。

mod channel;
mod event;
mod payload;
mod permission;
mod token;

pub use channel::{default_channels, ChannelImportance, ChannelSpec, ATTENDANCE_CHANNEL_ID, DEFAULT_CHANNEL_ID};
pub use event::{NotificationResponse, ReceivedNotification, DEFAULT_ACTION_IDENTIFIER};
pub use payload::{
    NotificationContent, NotificationPayload, NotificationRequest, NotificationTrigger,
    DEFAULT_SOUND, TEST_NOTIFICATION_BADGE,
};
pub use permission::PermissionStatus;
pub use token::DeviceToken;
