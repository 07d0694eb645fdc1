//! Business logic use cases
//! 通知注册流程的用例
//!
//! [NotificationLifecycleController]
//         ↓
// TokenAcquirer ── PermissionGate ── ChannelConfigurator
//         ↓
// RegistrationStore (persist)
//         ↓
// ListenerRegistry (subscribe)
//
// StartupHandshake runs independently, once per page load.

pub mod channel_configurator;
pub mod listener_registry;
pub mod notification_lifecycle;
pub mod permission_gate;
pub mod registration_store;
pub mod startup_handshake;
pub mod token_acquirer;

pub use channel_configurator::ChannelConfigurator;
pub use listener_registry::{ListenerHandle, ListenerRegistry};
pub use notification_lifecycle::{
    LifecycleEventEmitter, NotificationLifecycleController, NoopLifecycleEventEmitter,
};
pub use permission_gate::{PermissionGate, PermissionGateError, PermissionOutcome};
pub use registration_store::{RegistrationStore, RegistrationStoreError};
pub use startup_handshake::StartupHandshake;
pub use token_acquirer::{derive_device_id, AcquireError, TokenAcquirer};
