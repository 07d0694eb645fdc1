use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action identifier reported when the user taps the notification body.
pub const DEFAULT_ACTION_IDENTIFIER: &str = "default";

/// A notification delivered to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedNotification {
    pub identifier: String,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// A user interaction with a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: ReceivedNotification,
    #[serde(default = "default_action")]
    pub action_identifier: String,
}

fn default_action() -> String {
    DEFAULT_ACTION_IDENTIFIER.to_string()
}

impl NotificationResponse {
    /// Data payload attached to the tapped notification.
    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.notification.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults_action_identifier() {
        let json = r#"{"notification":{"identifier":"n-1","title":"t","body":null,"data":{"screen":"details"}}}"#;

        let response: NotificationResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.action_identifier, DEFAULT_ACTION_IDENTIFIER);
        assert_eq!(response.data().get("screen").map(String::as_str), Some("details"));
    }
}
