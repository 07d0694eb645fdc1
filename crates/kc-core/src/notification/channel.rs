use serde::{Deserialize, Serialize};

pub const DEFAULT_CHANNEL_ID: &str = "default";
pub const ATTENDANCE_CHANNEL_ID: &str = "attendance";

/// Channel importance, mirroring the Android importance levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelImportance {
    None,
    Min,
    Low,
    Default,
    High,
    Max,
}

/// Delivery channel declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
    pub importance: ChannelImportance,
    /// Alternating off/on durations in milliseconds.
    pub vibration_pattern: Vec<u64>,
    pub light_color: Option<String>,
    pub sound: Option<String>,
    pub enable_vibrate: bool,
    pub enable_lights: bool,
}

/// The channels the shell declares on platforms that have them.
pub fn default_channels() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec {
            id: DEFAULT_CHANNEL_ID.to_string(),
            name: "Default".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: Some("#FF231F7C".to_string()),
            sound: Some("default".to_string()),
            enable_vibrate: true,
            enable_lights: true,
        },
        ChannelSpec {
            id: ATTENDANCE_CHANNEL_ID.to_string(),
            name: "Attendance".to_string(),
            importance: ChannelImportance::Max,
            vibration_pattern: vec![0, 250, 250, 250, 250, 250],
            light_color: None,
            sound: Some("default".to_string()),
            enable_vibrate: true,
            enable_lights: false,
        },
    ]
}
