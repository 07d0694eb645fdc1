use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sound name used for locally scheduled notifications.
pub const DEFAULT_SOUND: &str = "default";

/// Badge count set by the test notification.
pub const TEST_NOTIFICATION_BADGE: u32 = 1;

/// Input for a locally scheduled (device-originated) notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Content handed to the scheduler: default sound, badge of one,
    /// missing data becomes an empty map.
    pub fn into_content(self) -> NotificationContent {
        NotificationContent {
            title: self.title,
            body: self.body,
            data: self.data.unwrap_or_default(),
            sound: Some(DEFAULT_SOUND.to_string()),
            badge: Some(TEST_NOTIFICATION_BADGE),
        }
    }
}

/// Content of a notification as accepted by the scheduling API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
    pub sound: Option<String>,
    pub badge: Option<u32>,
}

/// When a scheduled notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationTrigger {
    After(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub content: NotificationContent,
    /// `None` fires immediately.
    pub trigger: Option<NotificationTrigger>,
}

impl NotificationRequest {
    pub fn immediate(content: NotificationContent) -> Self {
        Self {
            content,
            trigger: None,
        }
    }
}
