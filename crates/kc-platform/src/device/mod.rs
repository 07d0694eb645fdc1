//! Device facts.

mod build_prop;
mod system_device_info;

pub use system_device_info::SystemDeviceInfo;
