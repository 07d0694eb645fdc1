//! # kc-core
//!
//! Core domain models and business logic for the ku-check shell.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! notification domain types, the registration lifecycle state machine and the
//! port traits implemented by the platform and infrastructure crates.

// Public module exports
pub mod app_dirs;
pub mod config;
pub mod device;
pub mod handshake;
pub mod ids;
pub mod lifecycle;
pub mod notification;
pub mod ports;
pub mod registration;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use device::DevicePlatform;
pub use handshake::StartupMessage;
pub use ids::{DeviceId, PushToken};
pub use lifecycle::{
    LifecyclePhase, LifecycleState, NotificationLifecycle, NotificationLifecycleAction,
    NotificationLifecycleEvent, NotificationUnavailable,
};
pub use notification::{
    ChannelImportance, ChannelSpec, DeviceToken, NotificationContent, NotificationPayload,
    NotificationRequest, NotificationResponse, NotificationTrigger, PermissionStatus,
    ReceivedNotification,
};
pub use registration::PersistedRegistration;
