//! Device domain models.

pub mod platform;

pub use platform::DevicePlatform;
