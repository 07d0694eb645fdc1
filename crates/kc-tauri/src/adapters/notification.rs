//! Notification ports backed by `tauri-plugin-notification`.
//!
//! 基于 tauri-plugin-notification 的通知端口实现。

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tauri::{AppHandle, Runtime};
use tauri_plugin_notification::{NotificationExt, PermissionState};
use tracing::{debug, info};

use kc_core::notification::{
    ChannelSpec, NotificationRequest, NotificationTrigger, PermissionStatus, DEFAULT_CHANNEL_ID,
};
use kc_core::ports::{
    ChannelError, NotificationChannelPort, NotificationPermissionPort, NotificationSchedulerPort,
    PermissionError, SchedulerError,
};

fn to_status(state: PermissionState) -> PermissionStatus {
    match state {
        PermissionState::Granted => PermissionStatus::Granted,
        PermissionState::Denied => PermissionStatus::Denied,
        PermissionState::Prompt | PermissionState::PromptWithRationale => {
            PermissionStatus::Undetermined
        }
    }
}

pub struct TauriNotificationPermission<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriNotificationPermission<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> NotificationPermissionPort for TauriNotificationPermission<R> {
    async fn current_status(&self) -> Result<PermissionStatus, PermissionError> {
        let state = self
            .app
            .notification()
            .permission_state()
            .map_err(|e| PermissionError::Query(e.to_string()))?;
        Ok(to_status(state))
    }

    async fn request(&self) -> Result<PermissionStatus, PermissionError> {
        // The OS prompt blocks until the user answers.
        let app = self.app.clone();
        let state = tokio::task::spawn_blocking(move || app.notification().request_permission())
            .await
            .map_err(|e| PermissionError::Request(e.to_string()))?
            .map_err(|e| PermissionError::Request(e.to_string()))?;

        info!(?state, "Notification permission prompt answered");
        Ok(to_status(state))
    }
}

/// Delivery channels exist only on Android; elsewhere every upsert is a no-op.
pub struct TauriNotificationChannels<R: Runtime> {
    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    app: AppHandle<R>,
}

impl<R: Runtime> TauriNotificationChannels<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> NotificationChannelPort for TauriNotificationChannels<R> {
    fn supports_channels(&self) -> bool {
        cfg!(target_os = "android")
    }

    #[cfg(target_os = "android")]
    async fn upsert_channel(&self, spec: &ChannelSpec) -> Result<(), ChannelError> {
        use kc_core::notification::ChannelImportance;
        use tauri_plugin_notification::{Channel, Importance};

        // The plugin has no `Max`; `High` is the loudest it can declare.
        let importance = match spec.importance {
            ChannelImportance::None => Importance::None,
            ChannelImportance::Min => Importance::Min,
            ChannelImportance::Low => Importance::Low,
            ChannelImportance::Default => Importance::Default,
            ChannelImportance::High | ChannelImportance::Max => Importance::High,
        };

        let mut builder = Channel::builder(spec.id.clone(), spec.name.clone())
            .importance(importance)
            .vibration(spec.enable_vibrate)
            .lights(spec.enable_lights);
        if let Some(color) = &spec.light_color {
            builder = builder.light_color(color.clone());
        }
        if let Some(sound) = &spec.sound {
            builder = builder.sound(sound.clone());
        }

        self.app
            .notification()
            .create_channel(builder.build())
            .map_err(|e| ChannelError::Create {
                id: spec.id.clone(),
                message: e.to_string(),
            })?;
        debug!(channel = %spec.id, "Notification channel upserted");
        Ok(())
    }

    #[cfg(not(target_os = "android"))]
    async fn upsert_channel(&self, spec: &ChannelSpec) -> Result<(), ChannelError> {
        debug!(channel = %spec.id, "Channels unsupported on this platform, skipping");
        Ok(())
    }
}

/// Shows notifications immediately; delayed triggers are rejected.
pub struct TauriNotificationScheduler<R: Runtime> {
    app: AppHandle<R>,
    next_id: AtomicI32,
}

impl<R: Runtime> TauriNotificationScheduler<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl<R: Runtime> NotificationSchedulerPort for TauriNotificationScheduler<R> {
    async fn schedule(&self, request: &NotificationRequest) -> Result<String, SchedulerError> {
        if let Some(NotificationTrigger::After(delay)) = request.trigger {
            return Err(SchedulerError::Schedule(format!(
                "delayed trigger of {}ms is not supported",
                delay.as_millis()
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let content = &request.content;

        // Foreground presentation: alert + sound, badge carried as extra.
        let mut builder = self
            .app
            .notification()
            .builder()
            .id(id)
            .channel_id(DEFAULT_CHANNEL_ID)
            .title(content.title.clone())
            .body(content.body.clone());
        if let Some(sound) = &content.sound {
            builder = builder.sound(sound.clone());
        }
        if let Some(badge) = content.badge {
            builder = builder.extra("badge", badge);
        }
        for (key, value) in &content.data {
            builder = builder.extra(key.clone(), value.clone());
        }

        builder
            .show()
            .map_err(|e| SchedulerError::Schedule(e.to_string()))?;

        Ok(id.to_string())
    }
}
