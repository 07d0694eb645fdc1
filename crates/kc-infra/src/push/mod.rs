//! Push token exchange.

mod expo_client;

pub use expo_client::{ExpoPushTokenClient, ExpoPushTokenConfig, PUSH_TOKEN_ENDPOINT};
