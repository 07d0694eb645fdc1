//! ku-check Application Orchestration Layer
//!
//! This crate contains the notification registration use cases and the
//! lifecycle controller that drives them.

pub mod deps;
pub mod usecases;

pub use deps::NotificationDeps;
pub use usecases::{
    ChannelConfigurator, ListenerHandle, ListenerRegistry, NotificationLifecycleController,
    PermissionGate, PermissionOutcome, RegistrationStore, StartupHandshake, TokenAcquirer,
};
