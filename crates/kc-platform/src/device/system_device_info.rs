//! Device facts read from the running system
//! 从运行系统读取设备信息

use std::path::Path;

use tracing::debug;

use kc_core::device::DevicePlatform;
use kc_core::ports::DeviceInfoPort;

use super::build_prop::BuildProps;

const BUILD_PROP: &str = "system/build.prop";
const VENDOR_BUILD_PROP: &str = "vendor/build.prop";
const MACHINE_ID: &str = "etc/machine-id";

const BUILD_ID_KEYS: &[&str] = &["ro.build.id", "ro.system.build.id"];
const MODEL_KEYS: &[&str] = &[
    "ro.product.model",
    "ro.product.system.model",
    "ro.product.vendor.model",
];

/// [`DeviceInfoPort`] backed by compile-time target facts and a few
/// well-known system files.
///
/// ## Behavior / 行为
/// - iOS: simulator builds are not physical devices
/// - Android: emulator images are detected from runtime properties and the
///   system and vendor `build.prop` files
/// - Desktop: never eligible for push delivery
///
/// Everything is read once at construction.
#[derive(Debug, Clone)]
pub struct SystemDeviceInfo {
    platform: DevicePlatform,
    physical: bool,
    machine_id: Option<String>,
    build_id: Option<String>,
    model: Option<String>,
}

impl SystemDeviceInfo {
    pub fn detect() -> Self {
        let platform = DevicePlatform::current();
        let runtime = match platform {
            DevicePlatform::Android => BuildProps::from_getprop(),
            _ => BuildProps::default(),
        };
        Self::from_sources(platform, Path::new("/"), runtime)
    }

    /// Read system files relative to `root` instead of `/`, without
    /// runtime properties.
    pub fn from_root(platform: DevicePlatform, root: &Path) -> Self {
        Self::from_sources(platform, root, BuildProps::default())
    }

    fn from_sources(platform: DevicePlatform, root: &Path, runtime: BuildProps) -> Self {
        let props = BuildProps::merged([
            runtime,
            BuildProps::read(&root.join(BUILD_PROP)),
            BuildProps::read(&root.join(VENDOR_BUILD_PROP)),
        ]);
        let machine_id = read_trimmed(&root.join(MACHINE_ID));

        let physical = match platform {
            DevicePlatform::Ios => !is_simulator_target(),
            DevicePlatform::Android => !props.looks_like_emulator(),
            DevicePlatform::Other => false,
        };

        let model = props
            .first(MODEL_KEYS)
            .map(str::to_string)
            .or_else(hostname);

        let info = Self {
            platform,
            physical,
            machine_id,
            build_id: props.first(BUILD_ID_KEYS).map(str::to_string),
            model,
        };
        debug!(
            platform = %info.platform,
            physical = info.physical,
            has_build_prop = !props.is_empty(),
            "Device info detected"
        );
        info
    }
}

impl DeviceInfoPort for SystemDeviceInfo {
    fn is_physical_device(&self) -> bool {
        self.physical
    }

    fn platform(&self) -> DevicePlatform {
        self.platform
    }

    fn stable_identifier(&self) -> Option<String> {
        self.machine_id.clone()
    }

    fn build_identifier(&self) -> Option<String> {
        self.build_id.clone()
    }

    fn model_name(&self) -> Option<String> {
        self.model.clone()
    }
}

/// The simulator runtime exports `SIMULATOR_UDID` to every app it hosts.
fn is_simulator_target() -> bool {
    cfg!(all(target_os = "ios", target_arch = "x86_64"))
        || std::env::var_os("SIMULATOR_UDID").is_some()
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn hostname() -> Option<String> {
    gethostname::gethostname()
        .into_string()
        .ok()
        .filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root_with(build_prop: Option<&str>, machine_id: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        write_root(&dir, build_prop, machine_id);
        dir
    }

    fn write_root(dir: &TempDir, build_prop: Option<&str>, machine_id: Option<&str>) {
        if let Some(content) = build_prop {
            std::fs::create_dir_all(dir.path().join("system")).unwrap();
            std::fs::write(dir.path().join(BUILD_PROP), content).unwrap();
        }
        if let Some(content) = machine_id {
            std::fs::create_dir_all(dir.path().join("etc")).unwrap();
            std::fs::write(dir.path().join(MACHINE_ID), content).unwrap();
        }
    }

    #[test]
    fn test_android_device_reads_build_prop() {
        let root = root_with(
            Some("ro.build.id=TQ3A.230805.001\nro.product.model=Pixel 7\nro.hardware=tensor\n"),
            None,
        );

        let info = SystemDeviceInfo::from_root(DevicePlatform::Android, root.path());

        assert!(info.is_physical_device());
        assert_eq!(info.build_identifier().as_deref(), Some("TQ3A.230805.001"));
        assert_eq!(info.model_name().as_deref(), Some("Pixel 7"));
        assert_eq!(info.stable_identifier(), None);
    }

    #[test]
    fn test_android_emulator_is_not_physical() {
        let root = root_with(Some("ro.hardware=ranchu\nro.build.id=SE1A\n"), None);

        let info = SystemDeviceInfo::from_root(DevicePlatform::Android, root.path());

        assert!(!info.is_physical_device());
    }

    #[test]
    fn test_desktop_is_never_eligible_and_uses_machine_id() {
        let root = root_with(None, Some("4c4c4544004d3510\n"));

        let info = SystemDeviceInfo::from_root(DevicePlatform::Other, root.path());

        assert!(!info.is_physical_device());
        assert_eq!(info.stable_identifier().as_deref(), Some("4c4c4544004d3510"));
        assert_eq!(info.build_identifier(), None);
    }

    #[test]
    fn test_android_11_emulator_system_and_vendor_props() {
        let root = root_with(
            Some(
                "ro.system.build.id=RSR1.210722.003\n\
                 ro.product.system.model=AOSP on IA Emulator\n\
                 ro.product.system.name=sdk_gphone_x86_64\n",
            ),
            None,
        );

        let info = SystemDeviceInfo::from_root(DevicePlatform::Android, root.path());

        assert!(!info.is_physical_device());
        assert_eq!(info.build_identifier().as_deref(), Some("RSR1.210722.003"));
        assert_eq!(info.model_name().as_deref(), Some("AOSP on IA Emulator"));
    }

    #[test]
    fn test_vendor_build_prop_marks_emulator() {
        let root = root_with(Some("ro.system.build.id=RSR1\n"), None);
        std::fs::create_dir_all(root.path().join("vendor")).unwrap();
        std::fs::write(
            root.path().join(VENDOR_BUILD_PROP),
            "ro.vendor.build.fingerprint=google/sdk_gphone_x86_64/emulator64_x86_64_arm64:11/RSR1/1:user/release-keys\n",
        )
        .unwrap();

        let info = SystemDeviceInfo::from_root(DevicePlatform::Android, root.path());

        assert!(!info.is_physical_device());
    }

    #[test]
    fn test_runtime_props_override_physical_looking_files() {
        let root = root_with(Some("ro.product.model=Pixel 7\nro.build.id=TQ3A\n"), None);
        let runtime = BuildProps::parse_getprop("[ro.boot.qemu]: [1]\n");

        let info = SystemDeviceInfo::from_sources(DevicePlatform::Android, root.path(), runtime);

        assert!(!info.is_physical_device());
        assert_eq!(info.model_name().as_deref(), Some("Pixel 7"));
    }
}
