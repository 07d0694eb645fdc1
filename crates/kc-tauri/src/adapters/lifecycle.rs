//! Lifecycle emitter that publishes controller events as Tauri events.

use anyhow::{Context, Result};
use tauri::{AppHandle, Runtime};

use kc_app::usecases::LifecycleEventEmitter;
use kc_core::lifecycle::{LifecyclePhase, LifecycleState};
use kc_core::notification::{NotificationResponse, ReceivedNotification};

use crate::events;

pub struct TauriLifecycleEventEmitter<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriLifecycleEventEmitter<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> LifecycleEventEmitter for TauriLifecycleEventEmitter<R> {
    fn emit_state_changed(&self, phase: LifecyclePhase, state: &LifecycleState) -> Result<()> {
        events::forward_state_changed(&self.app, phase, state)
            .context("Failed to emit notification state")
    }

    fn emit_received(&self, notification: &ReceivedNotification) -> Result<()> {
        events::forward_received(&self.app, notification)
            .context("Failed to emit received notification")
    }

    fn emit_tapped(&self, response: &NotificationResponse) -> Result<()> {
        events::forward_tapped(&self.app, response).context("Failed to emit notification tap")
    }
}
