use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kc_core::ports::{TokenStoreError, TokenStorePort};

/// Volatile store. Used in tests and when no data directory is available.
#[derive(Default)]
pub struct InMemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorePort for InMemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
