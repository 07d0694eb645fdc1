use crate::device::DevicePlatform;

/// Facts about the device the shell runs on.
///
/// Identifier accessors return `None` when the platform does not expose
/// the value; callers decide how to fall back.
pub trait DeviceInfoPort: Send + Sync {
    /// `false` on simulators and emulators.
    fn is_physical_device(&self) -> bool;

    fn platform(&self) -> DevicePlatform;

    /// Most stable per-installation identifier the platform offers.
    fn stable_identifier(&self) -> Option<String>;

    /// OS build identifier.
    fn build_identifier(&self) -> Option<String>;

    /// Human-readable model name.
    fn model_name(&self) -> Option<String>;
}
