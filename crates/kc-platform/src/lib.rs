//! # kc-platform
//!
//! Platform-specific implementations for the ku-check shell.
//!
//! This crate contains adapters that talk to the operating system:
//! device facts, application directories, and the in-process bridges
//! that carry notification events and native push tokens from the
//! native layer into the port interfaces.

pub mod app_dirs;
pub mod device;
pub mod notification;
