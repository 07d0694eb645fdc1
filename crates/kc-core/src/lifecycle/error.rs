use serde::{Deserialize, Serialize};

/// Surfaced when an unexpected failure carries no message of its own.
pub const INITIALIZE_FALLBACK_MESSAGE: &str = "알림 초기화 중 오류가 발생했습니다";

/// Surfaced when scheduling a local notification fails without a message.
pub const SCHEDULE_FALLBACK_MESSAGE: &str = "알림 전송 실패";

/// Why a delivery token cannot be obtained at all.
///
/// Both cases are non-transient: retrying without a change on the device
/// (real hardware, permission granted in settings) gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum NotificationUnavailable {
    /// Simulator or emulator; no prompt was shown.
    #[error("실제 기기가 아니므로 푸시 알림을 사용할 수 없습니다")]
    IneligibleDevice,

    /// The user declined the prompt or denied it earlier.
    #[error("알림 권한이 거부되었습니다. 설정에서 알림을 허용해 주세요")]
    PermissionDenied,
}

impl NotificationUnavailable {
    /// Whether the UI should point the user to the system settings.
    pub fn is_settings_actionable(&self) -> bool {
        matches!(self, NotificationUnavailable::PermissionDenied)
    }
}
