use async_trait::async_trait;

use super::errors::PermissionError;
use crate::notification::PermissionStatus;

/// Notification permission API.
///
/// 通知权限端口。
#[async_trait]
pub trait NotificationPermissionPort: Send + Sync {
    /// Read the current status without prompting.
    ///
    /// 读取当前状态（不弹窗）。
    async fn current_status(&self) -> Result<PermissionStatus, PermissionError>;

    /// Prompt the user once and return the resulting status.
    ///
    /// 弹窗请求一次并返回结果。
    async fn request(&self) -> Result<PermissionStatus, PermissionError>;
}
