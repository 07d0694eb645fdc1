//! # kc-infra
//!
//! Infrastructure adapters: persistent token store, system clock and the
//! push-gateway token exchange client.

pub mod push;
pub mod time;
pub mod token_store;

pub use push::{ExpoPushTokenClient, ExpoPushTokenConfig};
pub use time::SystemClock;
pub use token_store::{FileTokenStore, InMemoryTokenStore};
