use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, info_span, warn, Instrument};

use kc_core::lifecycle::{
    LifecyclePhase, LifecycleState, NotificationLifecycle, NotificationLifecycleAction,
    NotificationLifecycleEvent, INITIALIZE_FALLBACK_MESSAGE, SCHEDULE_FALLBACK_MESSAGE,
};
use kc_core::notification::{
    DeviceToken, NotificationPayload, NotificationRequest, NotificationResponse,
    ReceivedNotification,
};
use kc_core::ports::{NotificationSchedulerPort, ReceivedCallback, ResponseCallback};

use super::LifecycleEventEmitter;
use crate::deps::NotificationDeps;
use crate::usecases::{
    AcquireError, ChannelConfigurator, ListenerHandle, ListenerRegistry, PermissionGate,
    RegistrationStore, TokenAcquirer,
};

struct ControllerInner {
    lifecycle: NotificationLifecycle,
    /// Incremented by every `initialize`; results of older attempts are dropped.
    attempt: u64,
    listeners: ListenerHandle,
    started: bool,
    stopped: bool,
}

/// Drives the registration lifecycle: permission, token, persistence,
/// listeners, teardown.
///
/// 驱动通知注册生命周期的控制器。
///
/// ## Behavior / 行为
/// - `start` runs `initialize` and the restore path concurrently, once
/// - A newer `initialize` supersedes an in-flight one; its listener
///   subscription replaces the previous one
/// - After `stop`, late results are discarded and late subscriptions are
///   disposed immediately
/// - No method returns an error; failures land in `LifecycleState::error`
/// - Every phase change is published on [`Self::watch_phase`]
pub struct NotificationLifecycleController {
    acquirer: Arc<TokenAcquirer>,
    registrations: Arc<RegistrationStore>,
    listeners: Arc<ListenerRegistry>,
    scheduler: Arc<dyn NotificationSchedulerPort>,
    emitter: Arc<dyn LifecycleEventEmitter>,
    project_id: String,
    phase_tx: watch::Sender<LifecyclePhase>,
    inner: Mutex<ControllerInner>,
}

impl NotificationLifecycleController {
    pub fn new(
        acquirer: Arc<TokenAcquirer>,
        registrations: Arc<RegistrationStore>,
        listeners: Arc<ListenerRegistry>,
        scheduler: Arc<dyn NotificationSchedulerPort>,
        emitter: Arc<dyn LifecycleEventEmitter>,
        project_id: impl Into<String>,
    ) -> Self {
        let lifecycle = NotificationLifecycle::new();
        let (phase_tx, _) = watch::channel(lifecycle.phase());
        Self {
            acquirer,
            registrations,
            listeners,
            scheduler,
            emitter,
            project_id: project_id.into(),
            phase_tx,
            inner: Mutex::new(ControllerInner {
                lifecycle,
                attempt: 0,
                listeners: ListenerHandle::empty(),
                started: false,
                stopped: false,
            }),
        }
    }

    /// Assemble the use case graph from a dependency bundle.
    pub fn from_deps(deps: NotificationDeps, project_id: impl Into<String>) -> Self {
        let NotificationDeps {
            device_info,
            device_id,
            permission,
            channels,
            push_tokens,
            events,
            scheduler,
            token_store,
            emitter,
        } = deps;

        let configurator = Arc::new(ChannelConfigurator::new(channels));
        let gate = Arc::new(PermissionGate::new(
            device_info.clone(),
            permission,
            configurator,
        ));
        let acquirer = Arc::new(TokenAcquirer::new(gate, push_tokens, device_info, device_id));

        Self::new(
            acquirer,
            Arc::new(RegistrationStore::new(token_store)),
            Arc::new(ListenerRegistry::new(events)),
            scheduler,
            emitter,
            project_id,
        )
    }

    pub async fn state(&self) -> LifecycleState {
        self.inner.lock().await.lifecycle.state().clone()
    }

    pub async fn phase(&self) -> LifecyclePhase {
        self.inner.lock().await.lifecycle.phase()
    }

    /// Phase and state read under one lock, so they always agree.
    pub async fn snapshot(&self) -> (LifecyclePhase, LifecycleState) {
        let inner = self.inner.lock().await;
        (inner.lifecycle.phase(), inner.lifecycle.state().clone())
    }

    /// Receiver that observes every phase change.
    pub fn watch_phase(&self) -> watch::Receiver<LifecyclePhase> {
        self.phase_tx.subscribe()
    }

    /// Mount: initialize and restore concurrently. Later calls are no-ops.
    pub async fn start(&self) {
        {
            let mut inner = self.inner.lock().await;
            if inner.started {
                debug!("Notification lifecycle already started");
                return;
            }
            inner.started = true;
        }

        let span = info_span!("usecase.notification_lifecycle.start");
        async {
            tokio::join!(self.initialize(), self.restore());
        }
        .instrument(span)
        .await
    }

    /// Unmount: dispose the active listeners, if any.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        inner.stopped = true;
        inner.listeners.dispose_all();
        info!("Notification lifecycle stopped");
    }

    /// Run one initialize attempt to completion.
    pub async fn initialize(&self) {
        let (attempt, actions) = {
            let mut inner = self.inner.lock().await;
            if inner.stopped {
                debug!("Initialize ignored after stop");
                return;
            }
            inner.attempt += 1;
            let attempt = inner.attempt;
            let actions = self.apply(&mut inner, NotificationLifecycleEvent::InitializeRequested);
            (attempt, actions)
        };

        let span = info_span!("usecase.notification_lifecycle.initialize", attempt);
        async {
            let mut acquired: Option<DeviceToken> = None;
            let mut pending = actions;

            while !pending.is_empty() {
                let mut follow_up = Vec::new();
                for action in pending {
                    debug!(?action, "Executing lifecycle action");
                    if let Some(event) = self.execute(action, attempt, &mut acquired).await {
                        follow_up.push(event);
                    }
                }

                pending = Vec::new();
                for event in follow_up {
                    match self.apply_for_attempt(attempt, event).await {
                        Some(actions) => pending.extend(actions),
                        None => {
                            debug!(attempt, "Superseded attempt result discarded");
                            return;
                        }
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Schedule an immediate local notification. Failures are recorded in
    /// the error field.
    pub async fn send_test_notification(&self, payload: NotificationPayload) -> Option<String> {
        let span = info_span!("usecase.notification_lifecycle.send_test_notification");
        async {
            let request = NotificationRequest::immediate(payload.into_content());

            match self.scheduler.schedule(&request).await {
                Ok(id) => {
                    info!(notification_id = %id, "Test notification scheduled");
                    Some(id)
                }
                Err(err) => {
                    error!(error = %err, "Error sending test notification");
                    let message = non_empty(err.to_string(), SCHEDULE_FALLBACK_MESSAGE);
                    let mut inner = self.inner.lock().await;
                    self.apply(
                        &mut inner,
                        NotificationLifecycleEvent::ScheduleFailed { message },
                    );
                    None
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn clear_error(&self) {
        let mut inner = self.inner.lock().await;
        self.apply(&mut inner, NotificationLifecycleEvent::ClearError);
    }

    async fn restore(&self) {
        match self.registrations.load_token().await {
            Ok(Some(token)) => {
                let mut inner = self.inner.lock().await;
                if inner.stopped {
                    return;
                }
                debug!(token = ?token, "Restoring persisted push token");
                self.apply(
                    &mut inner,
                    NotificationLifecycleEvent::TokenRestored {
                        token: token.into_inner(),
                    },
                );
            }
            Ok(None) => debug!("No persisted push token"),
            Err(err) => warn!(error = %err, "Failed to read persisted push token"),
        }
    }

    async fn execute(
        &self,
        action: NotificationLifecycleAction,
        attempt: u64,
        acquired: &mut Option<DeviceToken>,
    ) -> Option<NotificationLifecycleEvent> {
        match action {
            NotificationLifecycleAction::AcquireToken => {
                match self.acquirer.acquire(&self.project_id).await {
                    Ok(token) => {
                        let event = NotificationLifecycleEvent::TokenAcquired {
                            token: token.token().as_str().to_string(),
                        };
                        *acquired = Some(token);
                        Some(event)
                    }
                    Err(AcquireError::Unavailable(reason)) => {
                        warn!(%reason, "Push notifications unavailable");
                        Some(NotificationLifecycleEvent::TokenUnavailable { reason })
                    }
                    Err(AcquireError::Platform(message)) => {
                        error!(error = %message, "Notification initialization error");
                        Some(NotificationLifecycleEvent::AcquisitionFailed {
                            message: non_empty(message, INITIALIZE_FALLBACK_MESSAGE),
                        })
                    }
                }
            }
            NotificationLifecycleAction::PersistRegistration => {
                let Some(token) = acquired.as_ref() else {
                    return Some(NotificationLifecycleEvent::PersistenceFailed {
                        message: INITIALIZE_FALLBACK_MESSAGE.to_string(),
                    });
                };
                match self.registrations.save(token).await {
                    Ok(()) => Some(NotificationLifecycleEvent::RegistrationPersisted),
                    Err(err) => {
                        error!(error = %err, "Failed to persist registration");
                        Some(NotificationLifecycleEvent::PersistenceFailed {
                            message: non_empty(err.to_string(), INITIALIZE_FALLBACK_MESSAGE),
                        })
                    }
                }
            }
            NotificationLifecycleAction::SubscribeListeners => {
                let mut handle = self
                    .listeners
                    .subscribe(self.foreground_callback(), self.response_callback());

                let mut inner = self.inner.lock().await;
                if inner.stopped || inner.attempt != attempt {
                    debug!(attempt, "Disposing listeners of a superseded attempt");
                    handle.dispose_all();
                    return None;
                }
                inner.listeners.dispose_all();
                inner.listeners = handle;
                Some(NotificationLifecycleEvent::ListenersSubscribed)
            }
        }
    }

    async fn apply_for_attempt(
        &self,
        attempt: u64,
        event: NotificationLifecycleEvent,
    ) -> Option<Vec<NotificationLifecycleAction>> {
        let mut inner = self.inner.lock().await;
        if inner.stopped || inner.attempt != attempt {
            return None;
        }
        Some(self.apply(&mut inner, event))
    }

    fn apply(
        &self,
        inner: &mut ControllerInner,
        event: NotificationLifecycleEvent,
    ) -> Vec<NotificationLifecycleAction> {
        let from = inner.lifecycle.phase();
        let before = inner.lifecycle.clone();
        let event_name = format!("{:?}", event);
        let (next, actions) = before.clone().transition(event);

        if next != before {
            debug!(from = ?from, to = ?next.phase(), event = %event_name, "Lifecycle transition");
            if let Err(err) = self.emitter.emit_state_changed(next.phase(), next.state()) {
                warn!(error = %err, "Failed to emit lifecycle state");
            }
            let phase = next.phase();
            self.phase_tx.send_if_modified(|current| {
                let changed = *current != phase;
                *current = phase;
                changed
            });
        }
        inner.lifecycle = next;
        actions
    }

    fn foreground_callback(&self) -> ReceivedCallback {
        let emitter = self.emitter.clone();
        Arc::new(move |notification: ReceivedNotification| {
            info!(identifier = %notification.identifier, "Processing foreground notification");
            if let Err(err) = emitter.emit_received(&notification) {
                warn!(error = %err, "Failed to forward received notification");
            }
        })
    }

    fn response_callback(&self) -> ResponseCallback {
        let emitter = self.emitter.clone();
        Arc::new(move |response: NotificationResponse| {
            info!(data = ?response.data(), "User tapped notification");
            if let Err(err) = emitter.emit_tapped(&response) {
                warn!(error = %err, "Failed to forward notification response");
            }
        })
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
