use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Device identifier derived from platform identifiers.
///
/// Not guaranteed globally unique, but never empty: construction goes
/// through [`DeviceId::parse`], which rejects blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Build a device id from a candidate value, trimming whitespace.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(candidate: &str) -> Option<Self> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Synthetic identifier seeded by a millisecond timestamp.
    pub fn synthetic(now_ms: i64) -> Self {
        Self(format!("device-{now_ms}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DeviceId::parse(&value).ok_or_else(|| "device id must not be empty".to_string())
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}
