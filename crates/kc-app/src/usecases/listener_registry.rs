//! Notification listener subscriptions.

use std::sync::Arc;

use tracing::debug;

use kc_core::ports::{
    NotificationEventsPort, NotificationSubscription, ReceivedCallback, ResponseCallback,
};

/// Subscribes the foreground and response listeners as one unit.
pub struct ListenerRegistry {
    events: Arc<dyn NotificationEventsPort>,
}

impl ListenerRegistry {
    pub fn new(events: Arc<dyn NotificationEventsPort>) -> Self {
        Self { events }
    }

    /// `on_foreground` fires for every notification delivered while the
    /// app is in the foreground; `on_response` once per user interaction.
    pub fn subscribe(
        &self,
        on_foreground: ReceivedCallback,
        on_response: ResponseCallback,
    ) -> ListenerHandle {
        let foreground = self.events.add_received_listener(on_foreground);
        let response = self.events.add_response_listener(on_response);
        debug!("Notification listeners subscribed");

        ListenerHandle {
            foreground: Some(foreground),
            response: Some(response),
        }
    }
}

/// Both subscriptions of one `subscribe` call.
///
/// 一次订阅产生的两个监听句柄，统一释放。
#[derive(Default)]
pub struct ListenerHandle {
    foreground: Option<Box<dyn NotificationSubscription>>,
    response: Option<Box<dyn NotificationSubscription>>,
}

impl ListenerHandle {
    /// A handle that holds nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.foreground.is_some() || self.response.is_some()
    }

    /// Remove both listeners. Repeated calls are no-ops.
    pub fn dispose_all(&mut self) {
        let mut removed = false;
        if let Some(subscription) = self.foreground.take() {
            subscription.remove();
            removed = true;
        }
        if let Some(subscription) = self.response.take() {
            subscription.remove();
            removed = true;
        }
        if removed {
            debug!("Notification listeners disposed");
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("foreground", &self.foreground.is_some())
            .field("response", &self.response.is_some())
            .finish()
    }
}
