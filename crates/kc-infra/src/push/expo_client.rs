use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, Instrument};

use kc_core::ids::PushToken;
use kc_core::ports::{NativeDeviceTokenPort, NativeTokenKind, PushTokenError, PushTokenPort};

/// Path of the token exchange endpoint, relative to the gateway URL.
pub const PUSH_TOKEN_ENDPOINT: &str = "/--/api/v2/push/getExpoPushToken";

#[derive(Debug, Clone)]
pub struct ExpoPushTokenConfig {
    /// e.g. `https://exp.host`
    pub gateway_url: String,
    /// Bundle identifier / application id.
    pub app_id: String,
    /// Per-installation identifier sent as `deviceId`.
    pub installation_id: String,
    /// Whether the native token comes from the APNs sandbox.
    pub development: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeRequest<'a> {
    #[serde(rename = "type")]
    kind: NativeTokenKind,
    device_id: &'a str,
    development: bool,
    app_id: &'a str,
    device_token: &'a str,
    project_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    data: ExchangeData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeData {
    expo_push_token: String,
}

/// Exchanges the native APNs/FCM token for a gateway push token.
pub struct ExpoPushTokenClient {
    http: reqwest::Client,
    native: Arc<dyn NativeDeviceTokenPort>,
    config: ExpoPushTokenConfig,
}

impl ExpoPushTokenClient {
    pub fn new(
        config: ExpoPushTokenConfig,
        native: Arc<dyn NativeDeviceTokenPort>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("build push gateway http client")?;

        Ok(Self {
            http,
            native,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.gateway_url.trim_end_matches('/'),
            PUSH_TOKEN_ENDPOINT
        )
    }
}

#[async_trait]
impl PushTokenPort for ExpoPushTokenClient {
    async fn request_token(&self, project_id: &str) -> Result<PushToken, PushTokenError> {
        let span = info_span!("infra.push.request_token", project_id = %project_id);

        async {
            let native = self.native.device_token().await?;
            debug!(kind = ?native.kind, "Native device token available");

            let body = ExchangeRequest {
                kind: native.kind,
                device_id: &self.config.installation_id,
                development: self.config.development,
                app_id: &self.config.app_id,
                device_token: &native.value,
                project_id,
            };

            let response = self
                .http
                .post(self.endpoint())
                .json(&body)
                .send()
                .await
                .map_err(|e| PushTokenError::Gateway(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(PushTokenError::Gateway(format!("HTTP {status}: {text}")));
            }

            let parsed: ExchangeResponse = response
                .json()
                .await
                .map_err(|e| PushTokenError::InvalidResponse(e.to_string()))?;

            let token = parsed.data.expo_push_token;
            if token.trim().is_empty() {
                return Err(PushTokenError::InvalidResponse(
                    "empty expoPushToken".to_string(),
                ));
            }

            Ok(PushToken::new(token))
        }
        .instrument(span)
        .await
    }
}
