use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Platform a delivery token was issued for.
///
/// Only the two mobile platforms have native push; everything else
/// (desktop builds, browsers) collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    Ios,
    Android,
    Other,
}

impl DevicePlatform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            DevicePlatform::Ios
        } else if cfg!(target_os = "android") {
            DevicePlatform::Android
        } else {
            DevicePlatform::Other
        }
    }

    /// Whether the platform groups notifications into delivery channels.
    pub fn has_delivery_channels(&self) -> bool {
        matches!(self, DevicePlatform::Android)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DevicePlatform::Ios => "ios",
            DevicePlatform::Android => "android",
            DevicePlatform::Other => "other",
        }
    }
}

impl FromStr for DevicePlatform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(DevicePlatform::Ios),
            "android" => Ok(DevicePlatform::Android),
            _ => Ok(DevicePlatform::Other),
        }
    }
}

impl Display for DevicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_display() {
        for platform in [DevicePlatform::Ios, DevicePlatform::Android, DevicePlatform::Other] {
            let parsed: DevicePlatform = platform.to_string().parse().unwrap();
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn test_unknown_platform_strings_map_to_other() {
        assert_eq!("web".parse::<DevicePlatform>(), Ok(DevicePlatform::Other));
        assert_eq!("macos".parse::<DevicePlatform>(), Ok(DevicePlatform::Other));
    }

    #[test]
    fn test_only_android_has_channels() {
        assert!(DevicePlatform::Android.has_delivery_channels());
        assert!(!DevicePlatform::Ios.has_delivery_channels());
        assert!(!DevicePlatform::Other.has_delivery_channels());
    }
}
