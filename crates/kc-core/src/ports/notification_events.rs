use std::sync::Arc;

use crate::notification::{NotificationResponse, ReceivedNotification};

/// Called for every notification delivered while the app is foregrounded.
pub type ReceivedCallback = Arc<dyn Fn(ReceivedNotification) + Send + Sync>;

/// Called once per user interaction with a delivered notification.
pub type ResponseCallback = Arc<dyn Fn(NotificationResponse) + Send + Sync>;

/// A live listener registration.
///
/// 一个有效的监听注册。
pub trait NotificationSubscription: Send + Sync {
    /// Stop delivering events to the listener. Calling it again is a no-op.
    ///
    /// 停止向监听器投递事件；重复调用无副作用。
    fn remove(&self);
}

/// Notification event streams.
pub trait NotificationEventsPort: Send + Sync {
    fn add_received_listener(&self, callback: ReceivedCallback)
        -> Box<dyn NotificationSubscription>;

    fn add_response_listener(&self, callback: ResponseCallback)
        -> Box<dyn NotificationSubscription>;
}
