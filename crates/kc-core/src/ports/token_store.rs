use async_trait::async_trait;

use super::errors::TokenStoreError;

/// Scoped string key-value store that survives process restarts.
///
/// 跨进程重启保留的字符串键值存储。
///
/// # Behavior / 行为
/// - Each `set` is atomic per key; there is no multi-key transaction.
/// - `get` of a missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait TokenStorePort: Send + Sync {
    /// Get a value by key.
    ///
    /// 按 key 读取数据。
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError>;

    /// Set a value by key.
    ///
    /// 按 key 写入数据。
    async fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;
}
