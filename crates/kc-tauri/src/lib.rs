//! # kc-tauri
//!
//! Tauri integration layer for the ku-check shell.
//!
//! This crate provides:
//! - Bootstrap: configuration, tracing, dependency wiring and the run loop
//! - Tauri command handlers
//! - Event forwarding to the embedded page
//! - Adapters that implement kc-core ports on top of Tauri plugins
//!
//! ## Modules
//!
//! - **bootstrap**: `run_app` and everything it assembles
//! - **commands**: notification, registration and native bridge commands
//! - **events**: `notifications://*` event payloads and emitters
//! - **adapters**: notification plugin, webview bridge and lifecycle emitter adapters

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod events;

// Re-export commonly used types
pub use bootstrap::{run_app, ShellServices};
