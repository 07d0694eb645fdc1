//! Registration state machine.
//!
//! Defines a pure state transition function for the notification
//! registration flow.

use super::{LifecyclePhase, LifecycleState, NotificationUnavailable};

/// Events that drive the registration flow.
///
/// 驱动注册流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLifecycleEvent {
    /// Start (or restart) an initialize attempt.
    ///
    /// 开始（或重新开始）初始化。
    InitializeRequested,
    /// A delivery token was acquired.
    ///
    /// 已获取投递令牌。
    TokenAcquired { token: String },
    /// The device cannot receive a token (emulator or permission denied).
    ///
    /// 设备无法获取令牌。
    TokenUnavailable { reason: NotificationUnavailable },
    /// A platform call failed unexpectedly.
    ///
    /// 平台调用意外失败。
    AcquisitionFailed { message: String },
    /// The registration triple has been written to the token store.
    RegistrationPersisted,
    /// Writing the registration failed.
    PersistenceFailed { message: String },
    /// Foreground and response listeners are active.
    ListenersSubscribed,
    /// A token was read back from the token store.
    TokenRestored { token: String },
    /// Scheduling a local notification failed.
    ScheduleFailed { message: String },
    /// Manual reset of the error field.
    ClearError,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationLifecycleAction {
    /// Run the token acquirer.
    AcquireToken,
    /// Write platform, device id and token to the token store.
    PersistRegistration,
    /// Subscribe the foreground and response listeners.
    SubscribeListeners,
}

/// Pure registration state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLifecycle {
    phase: LifecyclePhase,
    state: LifecycleState,
}

impl NotificationLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn transition(
        mut self,
        event: NotificationLifecycleEvent,
    ) -> (Self, Vec<NotificationLifecycleAction>) {
        use NotificationLifecycleAction as Action;
        use NotificationLifecycleEvent as Event;

        let initializing = self.phase == LifecyclePhase::Initializing;

        let actions = match event {
            Event::InitializeRequested => {
                self.phase = LifecyclePhase::Initializing;
                self.state.is_loading = true;
                self.state.error = None;
                vec![Action::AcquireToken]
            }
            Event::TokenAcquired { token } if initializing => {
                self.state.push_token = Some(token);
                vec![Action::PersistRegistration]
            }
            Event::RegistrationPersisted if initializing => vec![Action::SubscribeListeners],
            Event::ListenersSubscribed if initializing => {
                self.phase = LifecyclePhase::Ready;
                self.state.is_loading = false;
                Vec::new()
            }
            Event::TokenUnavailable { reason } if initializing => {
                self.fail(reason.to_string());
                Vec::new()
            }
            Event::AcquisitionFailed { message } | Event::PersistenceFailed { message }
                if initializing =>
            {
                self.fail(message);
                Vec::new()
            }
            Event::TokenRestored { token } => {
                if self.state.push_token.is_none() {
                    self.state.push_token = Some(token);
                }
                Vec::new()
            }
            Event::ScheduleFailed { message } => {
                self.state.error = Some(message);
                Vec::new()
            }
            Event::ClearError => {
                self.state.error = None;
                Vec::new()
            }
            // Attempt results outside of Initializing are stale.
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(phase = ?self.phase, "ignoring lifecycle event outside of Initializing");
                Vec::new()
            }
        };

        (self, actions)
    }

    fn fail(&mut self, message: String) {
        self.phase = LifecyclePhase::Failed;
        self.state.is_loading = false;
        self.state.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NotificationLifecycleAction as Action;
    use NotificationLifecycleEvent as Event;

    fn initializing() -> NotificationLifecycle {
        NotificationLifecycle::new()
            .transition(Event::InitializeRequested)
            .0
    }

    #[test]
    fn initialize_sets_loading_and_requests_acquisition() {
        let (machine, actions) = NotificationLifecycle::new().transition(Event::InitializeRequested);

        assert_eq!(machine.phase(), LifecyclePhase::Initializing);
        assert!(machine.state().is_loading);
        assert_eq!(machine.state().error, None);
        assert_eq!(actions, vec![Action::AcquireToken]);
    }

    #[test]
    fn success_path_persists_before_subscribing() {
        let (machine, actions) = initializing().transition(Event::TokenAcquired {
            token: "tok-abc123".to_string(),
        });
        assert_eq!(actions, vec![Action::PersistRegistration]);
        assert_eq!(machine.state().push_token.as_deref(), Some("tok-abc123"));
        assert!(machine.state().is_loading);

        let (machine, actions) = machine.transition(Event::RegistrationPersisted);
        assert_eq!(actions, vec![Action::SubscribeListeners]);

        let (machine, actions) = machine.transition(Event::ListenersSubscribed);
        assert!(actions.is_empty());
        assert_eq!(machine.phase(), LifecyclePhase::Ready);
        assert!(!machine.state().is_loading);
    }

    #[test]
    fn unavailable_fails_with_reason_message() {
        let (machine, actions) = initializing().transition(Event::TokenUnavailable {
            reason: NotificationUnavailable::IneligibleDevice,
        });

        assert!(actions.is_empty());
        assert_eq!(machine.phase(), LifecyclePhase::Failed);
        assert!(!machine.state().is_loading);
        assert_eq!(
            machine.state().error,
            Some(NotificationUnavailable::IneligibleDevice.to_string())
        );
    }

    #[test]
    fn failure_keeps_restored_token() {
        let machine = initializing()
            .transition(Event::TokenRestored {
                token: "persisted".to_string(),
            })
            .0;

        let (machine, _) = machine.transition(Event::AcquisitionFailed {
            message: "boom".to_string(),
        });

        assert_eq!(machine.phase(), LifecyclePhase::Failed);
        assert_eq!(machine.state().push_token.as_deref(), Some("persisted"));
        assert_eq!(machine.state().error.as_deref(), Some("boom"));
    }

    #[test]
    fn restore_does_not_overwrite_fresh_token() {
        let machine = initializing()
            .transition(Event::TokenAcquired {
                token: "fresh".to_string(),
            })
            .0;

        let (machine, _) = machine.transition(Event::TokenRestored {
            token: "stale".to_string(),
        });

        assert_eq!(machine.state().push_token.as_deref(), Some("fresh"));
    }

    #[test]
    fn reinitialize_clears_previous_error() {
        let failed = initializing()
            .transition(Event::PersistenceFailed {
                message: "disk full".to_string(),
            })
            .0;
        assert_eq!(failed.phase(), LifecyclePhase::Failed);

        let (machine, actions) = failed.transition(Event::InitializeRequested);

        assert_eq!(machine.phase(), LifecyclePhase::Initializing);
        assert_eq!(machine.state().error, None);
        assert_eq!(actions, vec![Action::AcquireToken]);
    }

    #[test]
    fn attempt_results_outside_initializing_are_ignored() {
        let idle = NotificationLifecycle::new();

        let (machine, actions) = idle.clone().transition(Event::TokenAcquired {
            token: "late".to_string(),
        });

        assert!(actions.is_empty());
        assert_eq!(machine, idle);
    }

    #[test]
    fn schedule_failure_sets_error_without_changing_phase() {
        let ready = initializing()
            .transition(Event::TokenAcquired { token: "t".to_string() })
            .0
            .transition(Event::RegistrationPersisted)
            .0
            .transition(Event::ListenersSubscribed)
            .0;

        let (machine, _) = ready.transition(Event::ScheduleFailed {
            message: "no scheduler".to_string(),
        });
        assert_eq!(machine.phase(), LifecyclePhase::Ready);
        assert_eq!(machine.state().error.as_deref(), Some("no scheduler"));

        let (machine, _) = machine.transition(Event::ClearError);
        assert_eq!(machine.state().error, None);
        assert_eq!(machine.phase(), LifecyclePhase::Ready);
    }
}
