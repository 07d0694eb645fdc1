//! Notification registration lifecycle.
//!
//! This module defines the registration state machine types. The machine
//! is pure: it returns the next state plus the side effects the caller
//! must run, and never touches a port itself.

mod error;
mod state;
pub mod state_machine;

pub use error::{NotificationUnavailable, INITIALIZE_FALLBACK_MESSAGE, SCHEDULE_FALLBACK_MESSAGE};
pub use state::{LifecyclePhase, LifecycleState};
pub use state_machine::{
    NotificationLifecycle, NotificationLifecycleAction, NotificationLifecycleEvent,
};
