use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::{debug, trace};

use kc_core::notification::{NotificationResponse, ReceivedNotification};
use kc_core::ports::{
    NotificationEventsPort, NotificationSubscription, ReceivedCallback, ResponseCallback,
};

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    received: Mutex<Vec<(u64, ReceivedCallback)>>,
    responses: Mutex<Vec<(u64, ResponseCallback)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Callback registry fed by the native layer.
///
/// 由原生层投递事件的回调注册表。
///
/// Callbacks run on the dispatching thread, outside the registry lock, so
/// a callback may subscribe or unsubscribe without deadlocking.
#[derive(Clone, Default)]
pub struct InProcessNotificationEvents {
    registry: Arc<Registry>,
}

impl InProcessNotificationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a foreground notification to every received listener.
    /// Returns the number of listeners invoked.
    pub fn dispatch_received(&self, notification: ReceivedNotification) -> usize {
        let callbacks: Vec<ReceivedCallback> = lock(&self.registry.received)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        trace!(
            identifier = %notification.identifier,
            listeners = callbacks.len(),
            "Dispatching received notification"
        );
        for callback in &callbacks {
            callback(notification.clone());
        }
        callbacks.len()
    }

    /// Deliver a user interaction to every response listener.
    pub fn dispatch_response(&self, response: NotificationResponse) -> usize {
        let callbacks: Vec<ResponseCallback> = lock(&self.registry.responses)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        trace!(
            identifier = %response.notification.identifier,
            listeners = callbacks.len(),
            "Dispatching notification response"
        );
        for callback in &callbacks {
            callback(response.clone());
        }
        callbacks.len()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry.received).len() + lock(&self.registry.responses).len()
    }

    fn next_id(&self) -> u64 {
        self.registry.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl NotificationEventsPort for InProcessNotificationEvents {
    fn add_received_listener(
        &self,
        callback: ReceivedCallback,
    ) -> Box<dyn NotificationSubscription> {
        let id = self.next_id();
        lock(&self.registry.received).push((id, callback));
        debug!(id, "Received listener added");
        Box::new(Subscription::new(&self.registry, id, ListenerKind::Received))
    }

    fn add_response_listener(
        &self,
        callback: ResponseCallback,
    ) -> Box<dyn NotificationSubscription> {
        let id = self.next_id();
        lock(&self.registry.responses).push((id, callback));
        debug!(id, "Response listener added");
        Box::new(Subscription::new(&self.registry, id, ListenerKind::Response))
    }
}

#[derive(Debug, Clone, Copy)]
enum ListenerKind {
    Received,
    Response,
}

struct Subscription {
    registry: Weak<Registry>,
    id: u64,
    kind: ListenerKind,
    removed: AtomicBool,
}

impl Subscription {
    fn new(registry: &Arc<Registry>, id: u64, kind: ListenerKind) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            id,
            kind,
            removed: AtomicBool::new(false),
        }
    }
}

impl NotificationSubscription for Subscription {
    fn remove(&self) {
        if self.removed.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        match self.kind {
            ListenerKind::Received => lock(&registry.received).retain(|(id, _)| *id != self.id),
            ListenerKind::Response => lock(&registry.responses).retain(|(id, _)| *id != self.id),
        }
        debug!(id = self.id, kind = ?self.kind, "Notification listener removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::AtomicUsize;

    fn notification(id: &str) -> ReceivedNotification {
        ReceivedNotification {
            identifier: id.to_string(),
            title: Some("출석 체크".to_string()),
            body: Some("지금 출석하세요".to_string()),
            data: BTreeMap::from([("screen".to_string(), "details".to_string())]),
        }
    }

    #[test]
    fn test_every_delivery_reaches_listener() {
        let events = InProcessNotificationEvents::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let _sub = events.add_received_listener(Arc::new(move |_: ReceivedNotification| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        events.dispatch_received(notification("n-1"));
        events.dispatch_received(notification("n-1"));

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_removed_listener_stops_receiving() {
        let events = InProcessNotificationEvents::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let sub = events.add_response_listener(Arc::new(move |response: NotificationResponse| {
            assert_eq!(response.data().get("screen").map(String::as_str), Some("details"));
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        let response = NotificationResponse {
            notification: notification("n-2"),
            action_identifier: "default".to_string(),
        };

        assert_eq!(events.dispatch_response(response.clone()), 1);
        sub.remove();
        sub.remove();
        assert_eq!(events.dispatch_response(response), 0);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_remove_only_affects_own_listener() {
        let events = InProcessNotificationEvents::new();
        let first = events.add_received_listener(Arc::new(|_: ReceivedNotification| {}));
        let _second = events.add_received_listener(Arc::new(|_: ReceivedNotification| {}));

        first.remove();

        assert_eq!(events.dispatch_received(notification("n-3")), 1);
    }
}
