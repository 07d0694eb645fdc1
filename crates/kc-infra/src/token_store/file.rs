use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use kc_core::ports::{TokenStoreError, TokenStorePort};

type Values = BTreeMap<String, String>;

/// Token store backed by a single JSON object file.
///
/// The file is read on first access and cached. Every `set` rewrites the
/// whole file through a temp file and a rename, under a mutex, so each key
/// write is atomic with respect to other writers in this process.
///
/// Reads report a corrupt file as [`TokenStoreError::Corrupt`]. A write
/// moves the corrupt file aside to `<name>.corrupt` and starts over from
/// an empty map.
pub struct FileTokenStore {
    path: PathBuf,
    cache: Mutex<Option<Values>>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<Values, TokenStoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Token store file not found, starting empty");
                return Ok(Values::new());
            }
            Err(e) => {
                return Err(TokenStoreError::Read(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Values::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| TokenStoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    async fn load<'a>(
        &self,
        cache: &'a mut Option<Values>,
    ) -> Result<&'a mut Values, TokenStoreError> {
        let values = match cache.take() {
            Some(values) => values,
            None => self.read_file().await?,
        };
        Ok(cache.insert(values))
    }

    async fn load_for_write<'a>(
        &self,
        cache: &'a mut Option<Values>,
    ) -> Result<&'a mut Values, TokenStoreError> {
        let values = match cache.take() {
            Some(values) => values,
            None => self.read_file_or_set_aside().await?,
        };
        Ok(cache.insert(values))
    }

    async fn read_file_or_set_aside(&self) -> Result<Values, TokenStoreError> {
        match self.read_file().await {
            Err(TokenStoreError::Corrupt(reason)) => {
                let moved_to = self
                    .set_aside()
                    .await
                    .map_err(|e| TokenStoreError::Write(format!("{e:#}")))?;
                warn!(
                    %reason,
                    moved_to = %moved_to.display(),
                    "Token store file corrupt, starting empty"
                );
                Ok(Values::new())
            }
            other => other,
        }
    }

    async fn set_aside(&self) -> Result<PathBuf> {
        let target = self.path.with_extension("json.corrupt");
        fs::rename(&self.path, &target).await.with_context(|| {
            format!(
                "move corrupt token store aside failed: {} -> {}",
                self.path.display(),
                target.display()
            )
        })?;
        Ok(target)
    }

    async fn atomic_write(&self, values: &Values) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create token store dir failed: {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(values).context("serialize token store")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp token store failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp token store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl TokenStorePort for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let mut cache = self.cache.lock().await;
        let values = self.load(&mut cache).await?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let mut cache = self.cache.lock().await;
        let values = self.load_for_write(&mut cache).await?;

        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.atomic_write(&next)
            .await
            .map_err(|e| TokenStoreError::Write(format!("{e:#}")))?;

        *values = next;
        debug!(key, "Token store value written");
        Ok(())
    }
}
