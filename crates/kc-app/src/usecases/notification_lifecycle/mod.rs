//! Notification registration lifecycle.
//!
//! The controller owns [`kc_core::LifecycleState`] and runs the side
//! effects requested by the pure state machine in `kc-core`.

mod controller;
mod emitter;

pub use controller::NotificationLifecycleController;
pub use emitter::{LifecycleEventEmitter, NoopLifecycleEventEmitter};
