use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque, platform-issued push-delivery handle.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Shortened form for logs: keeps the first and last few characters.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

// Debug goes through `masked` so tokens never land in logs verbatim.
impl std::fmt::Debug for PushToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PushToken").field(&self.masked()).finish()
    }
}

impl Display for PushToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PushToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PushToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
