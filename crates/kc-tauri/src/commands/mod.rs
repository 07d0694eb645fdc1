//! Tauri command handlers
//! Tauri 命令处理

pub mod error;
pub mod native;
pub mod notifications;
pub mod registration;

pub use error::map_err;
