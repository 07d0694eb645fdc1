//! # Notification Dependencies / 通知依赖
//!
//! Parameter grouping for [`crate::NotificationLifecycleController::from_deps`].
//! Not a builder: every field is required and nothing has a default.
//! 不是 Builder 模式，仅用于参数打包。

use std::sync::Arc;

use kc_core::ids::DeviceId;
use kc_core::ports::{
    DeviceInfoPort, NotificationChannelPort, NotificationEventsPort,
    NotificationPermissionPort, NotificationSchedulerPort, PushTokenPort, TokenStorePort,
};

use crate::usecases::LifecycleEventEmitter;

/// Ports the notification lifecycle depends on.
pub struct NotificationDeps {
    // Device / 设备
    pub device_info: Arc<dyn DeviceInfoPort>,
    /// Resolved once per installation, see [`crate::usecases::derive_device_id`].
    pub device_id: DeviceId,

    // Notification platform / 通知平台
    pub permission: Arc<dyn NotificationPermissionPort>,
    pub channels: Arc<dyn NotificationChannelPort>,
    pub push_tokens: Arc<dyn PushTokenPort>,
    pub events: Arc<dyn NotificationEventsPort>,
    pub scheduler: Arc<dyn NotificationSchedulerPort>,

    // Storage / 存储
    pub token_store: Arc<dyn TokenStorePort>,

    // Host / 宿主
    pub emitter: Arc<dyn LifecycleEventEmitter>,
}
