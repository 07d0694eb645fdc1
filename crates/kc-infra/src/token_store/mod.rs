//! [`kc_core::ports::TokenStorePort`] implementations.

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::InMemoryTokenStore;
