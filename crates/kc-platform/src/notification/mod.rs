//! In-process bridges between the native layer and the notification ports.

mod events;
mod native_token;

pub use events::InProcessNotificationEvents;
pub use native_token::NativeTokenRelay;
