//! Typed access to the persisted registration keys.

use std::sync::Arc;

use tracing::{debug, info, warn};

use kc_core::device::DevicePlatform;
use kc_core::ids::{DeviceId, PushToken};
use kc_core::notification::DeviceToken;
use kc_core::ports::{TokenStoreError, TokenStorePort};
use kc_core::registration::{
    PersistedRegistration, CURRENT_REGISTRATION_SCHEMA_VERSION, DEVICE_ID_KEY, PLATFORM_KEY,
    PUSH_TOKEN_KEY, SCHEMA_VERSION_KEY,
};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationStoreError {
    #[error(transparent)]
    Store(#[from] TokenStoreError),
    #[error("unsupported registration schema version: {0}")]
    UnsupportedVersion(String),
}

/// Reads and writes [`PersistedRegistration`] through the token store.
///
/// Writes are three independent `set` calls followed by the version
/// stamp. A crash in between leaves a partial record.
pub struct RegistrationStore {
    store: Arc<dyn TokenStorePort>,
}

impl RegistrationStore {
    pub fn new(store: Arc<dyn TokenStorePort>) -> Self {
        Self { store }
    }

    pub async fn save(&self, token: &DeviceToken) -> Result<(), RegistrationStoreError> {
        self.store
            .set(PUSH_TOKEN_KEY, token.token().as_str())
            .await?;
        self.store
            .set(DEVICE_ID_KEY, token.device_id().as_str())
            .await?;
        self.store
            .set(PLATFORM_KEY, token.platform().as_str())
            .await?;
        self.stamp_version().await?;

        debug!(device_id = %token.device_id(), "Registration persisted");
        Ok(())
    }

    /// Load the last written record, or `None` if nothing was ever saved.
    pub async fn load(&self) -> Result<Option<PersistedRegistration>, RegistrationStoreError> {
        self.migrate().await?;

        let token = self.store.get(PUSH_TOKEN_KEY).await?.map(PushToken::from);
        let device_id = self
            .store
            .get(DEVICE_ID_KEY)
            .await?
            .and_then(|value| DeviceId::parse(&value));
        let platform = self
            .store
            .get(PLATFORM_KEY)
            .await?
            .map(|value| value.parse::<DevicePlatform>().unwrap_or(DevicePlatform::Other));

        let record = PersistedRegistration {
            platform,
            device_id,
            token,
        };

        Ok((!record.is_empty()).then_some(record))
    }

    pub async fn load_token(&self) -> Result<Option<PushToken>, RegistrationStoreError> {
        Ok(self.load().await?.and_then(|record| record.token))
    }

    /// Bring an older layout up to the current schema version.
    ///
    /// v0 stored the same keys without a version marker, so upgrading is
    /// just writing the marker.
    async fn migrate(&self) -> Result<(), RegistrationStoreError> {
        match self.store.get(SCHEMA_VERSION_KEY).await? {
            Some(raw) => {
                let version = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| RegistrationStoreError::UnsupportedVersion(raw.clone()))?;
                if version > CURRENT_REGISTRATION_SCHEMA_VERSION {
                    warn!(version, "Registration written by a newer schema");
                    return Err(RegistrationStoreError::UnsupportedVersion(raw));
                }
                Ok(())
            }
            None => {
                let mut legacy = false;
                for key in [PUSH_TOKEN_KEY, DEVICE_ID_KEY, PLATFORM_KEY] {
                    if self.store.get(key).await?.is_some() {
                        legacy = true;
                        break;
                    }
                }
                if legacy {
                    self.stamp_version().await?;
                    info!(
                        to = CURRENT_REGISTRATION_SCHEMA_VERSION,
                        "Migrated unversioned registration layout"
                    );
                }
                Ok(())
            }
        }
    }

    async fn stamp_version(&self) -> Result<(), TokenStoreError> {
        self.store
            .set(
                SCHEMA_VERSION_KEY,
                &CURRENT_REGISTRATION_SCHEMA_VERSION.to_string(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_infra::token_store::InMemoryTokenStore;

    fn token() -> DeviceToken {
        DeviceToken::new(
            PushToken::new("tok-abc123"),
            DevicePlatform::Android,
            DeviceId::parse("QP1A.190711.020").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_writes_three_keys_and_version() {
        let store = Arc::new(InMemoryTokenStore::new());
        let registrations = RegistrationStore::new(store.clone());

        registrations.save(&token()).await.unwrap();

        assert_eq!(
            store.get(PUSH_TOKEN_KEY).await.unwrap().as_deref(),
            Some("tok-abc123")
        );
        assert_eq!(
            store.get(DEVICE_ID_KEY).await.unwrap().as_deref(),
            Some("QP1A.190711.020")
        );
        assert_eq!(
            store.get(PLATFORM_KEY).await.unwrap().as_deref(),
            Some("android")
        );
        assert_eq!(
            store.get(SCHEMA_VERSION_KEY).await.unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(
            registrations.load().await.unwrap().and_then(|r| r.complete()),
            Some(token())
        );
    }

    #[tokio::test]
    async fn test_load_empty_store_is_none() {
        let store = Arc::new(InMemoryTokenStore::new());
        let registrations = RegistrationStore::new(store.clone());

        assert!(registrations.load().await.unwrap().is_none());
        assert!(store.get(SCHEMA_VERSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_legacy_layout_is_stamped_on_load() {
        let store = Arc::new(InMemoryTokenStore::new());
        store.set(PUSH_TOKEN_KEY, "legacy-token").await.unwrap();
        let registrations = RegistrationStore::new(store.clone());

        let token = registrations.load_token().await.unwrap();

        assert_eq!(token, Some(PushToken::new("legacy-token")));
        assert_eq!(
            store.get(SCHEMA_VERSION_KEY).await.unwrap().as_deref(),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_newer_schema_is_rejected() {
        let store = Arc::new(InMemoryTokenStore::new());
        store.set(SCHEMA_VERSION_KEY, "7").await.unwrap();
        let registrations = RegistrationStore::new(store);

        let err = registrations.load().await.unwrap_err();

        assert!(matches!(err, RegistrationStoreError::UnsupportedVersion(v) if v == "7"));
    }
}
