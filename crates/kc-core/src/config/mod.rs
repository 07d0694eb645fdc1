//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//!
//! > **This module contains data only, no policy, no validation.**
//! > **此模块只包含数据结构定义，禁止：任何业务逻辑或策略、验证逻辑。**

mod app_config;

pub use app_config::{AppConfig, DEFAULT_HANDSHAKE_DELAY_MS, DEFAULT_PUSH_GATEWAY_URL, DEFAULT_SITE_URL};
