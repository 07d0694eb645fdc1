use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Android system properties, from `build.prop` files (`key=value` lines,
/// `#` comments) or from `getprop` output (`[key]: [value]` lines).
#[derive(Debug, Default, Clone)]
pub(crate) struct BuildProps {
    values: HashMap<String, String>,
}

const QEMU_KEYS: &[&str] = &["ro.kernel.qemu", "ro.boot.qemu"];
const HARDWARE_KEYS: &[&str] = &["ro.hardware", "ro.boot.hardware", "ro.product.board"];
const PRODUCT_NAME_KEYS: &[&str] = &[
    "ro.product.name",
    "ro.product.system.name",
    "ro.product.vendor.name",
    "ro.product.product.name",
    "ro.build.flavor",
];
const DEVICE_KEYS: &[&str] = &[
    "ro.product.device",
    "ro.product.system.device",
    "ro.product.vendor.device",
];
const FINGERPRINT_KEYS: &[&str] = &[
    "ro.build.fingerprint",
    "ro.system.build.fingerprint",
    "ro.vendor.build.fingerprint",
    "ro.bootimage.build.fingerprint",
];

impl BuildProps {
    pub(crate) fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { values }
    }

    pub(crate) fn parse_getprop(content: &str) -> Self {
        let values = content
            .lines()
            .filter_map(|line| line.trim().split_once("]: ["))
            .filter_map(|(key, value)| {
                let key = key.strip_prefix('[')?;
                let value = value.strip_suffix(']')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();
        Self { values }
    }

    /// Missing or unreadable files yield an empty set.
    pub(crate) fn read(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Runtime properties, including the boot and kernel ones that never
    /// appear in a `build.prop` file. Empty when `getprop` is unavailable.
    pub(crate) fn from_getprop() -> Self {
        match Command::new("getprop").output() {
            Ok(output) if output.status.success() => {
                Self::parse_getprop(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                debug!(status = %output.status, "getprop exited with an error");
                Self::default()
            }
            Err(err) => {
                debug!(error = %err, "getprop unavailable");
                Self::default()
            }
        }
    }

    /// Combine sources; earlier sources win on conflicting keys.
    pub(crate) fn merged(sources: impl IntoIterator<Item = BuildProps>) -> Self {
        let mut values = HashMap::new();
        for source in sources {
            for (key, value) in source.values {
                values.entry(key).or_insert(value);
            }
        }
        Self { values }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value among `keys`.
    pub(crate) fn first(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn any(&self, keys: &[&str], predicate: impl Fn(&str) -> bool) -> bool {
        keys.iter().filter_map(|key| self.get(key)).any(predicate)
    }

    /// Emulator images run under qemu, report goldfish/ranchu hardware, or
    /// ship `sdk_gphone*`/generic products.
    pub(crate) fn looks_like_emulator(&self) -> bool {
        self.any(QEMU_KEYS, |value| value == "1")
            || self.any(HARDWARE_KEYS, |value| {
                ["goldfish", "ranchu"].contains(&value)
            })
            || self.any(PRODUCT_NAME_KEYS, |value| value.starts_with("sdk"))
            || self.any(DEVICE_KEYS, |value| {
                value.starts_with("generic") || value.starts_with("emulator")
            })
            || self.any(FINGERPRINT_KEYS, |value| {
                value.contains("generic") || value.contains("emulator")
            })
            || self
                .get("ro.build.characteristics")
                .is_some_and(|value| value.split(',').any(|c| c == "emulator"))
    }
}
