//! Identifier newtypes.

mod device_id;
mod push_token;

pub use device_id::DeviceId;
pub use push_token::PushToken;
