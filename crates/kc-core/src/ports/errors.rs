use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory unavailable")]
    DataLocalDirUnavailable,
}

/// Key-value store failures.
///
/// 键值存储错误。
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store read failed: {0}")]
    Read(String),

    #[error("token store write failed: {0}")]
    Write(String),

    #[error("token store data corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("failed to read notification permission: {0}")]
    Query(String),

    #[error("failed to request notification permission: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to create notification channel {id}: {message}")]
    Create { id: String, message: String },
}

#[derive(Debug, Error)]
pub enum PushTokenError {
    #[error("native device token unavailable: {0}")]
    NativeTokenUnavailable(String),

    #[error("push gateway request failed: {0}")]
    Gateway(String),

    #[error("push gateway returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to schedule notification: {0}")]
    Schedule(String),
}

#[derive(Debug, Error)]
pub enum WebviewBridgeError {
    #[error("webview not found: {0}")]
    WebviewMissing(String),

    #[error("failed to encode startup message: {0}")]
    Encode(String),

    #[error("failed to post message to webview: {0}")]
    Post(String),
}
