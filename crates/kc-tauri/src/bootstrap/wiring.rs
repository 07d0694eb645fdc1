//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (token store, clock, push client) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (device info, event bus, token relay) / 创建 platform 层具体实现
//! - ✅ Inject everything into the use cases / 将所有依赖注入到用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide what happens when permission is denied
//! - 不判断"权限被拒绝时怎样"
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config already resolved in config.rs
//! - 配置已在 config.rs 中解析
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on kc-infra + kc-platform + kc-app simultaneously.**
//! > **这是唯一允许同时依赖 kc-infra、kc-platform 和 kc-app 的地方。**

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use kc_app::usecases::{derive_device_id, LifecycleEventEmitter};
use kc_app::{NotificationDeps, NotificationLifecycleController, RegistrationStore, StartupHandshake};
use kc_core::config::AppConfig;
use kc_core::ids::DeviceId;
use kc_core::ports::*;
use kc_infra::{
    ExpoPushTokenClient, ExpoPushTokenConfig, FileTokenStore, InMemoryTokenStore, SystemClock,
};
use kc_platform::device::SystemDeviceInfo;
use kc_platform::notification::{InProcessNotificationEvents, NativeTokenRelay};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Push token client initialization failed: {0}")]
    PushClientInit(String),
}

/// Ports whose implementations need a live `AppHandle`.
///
/// 需要 `AppHandle` 才能构造的端口，由 `run` 在 setup 阶段提供。
pub struct PlatformPorts {
    pub permission: Arc<dyn NotificationPermissionPort>,
    pub channels: Arc<dyn NotificationChannelPort>,
    pub scheduler: Arc<dyn NotificationSchedulerPort>,
    pub bridge: Arc<dyn WebviewBridgePort>,
    pub emitter: Arc<dyn LifecycleEventEmitter>,
}

/// Everything commands and run-loop hooks reach through Tauri state.
///
/// 通过 Tauri state 共享给命令与运行循环的服务集合。
#[derive(Clone)]
pub struct ShellServices {
    pub controller: Arc<NotificationLifecycleController>,
    pub handshake: Arc<StartupHandshake>,
    pub registrations: Arc<RegistrationStore>,
    pub device_info: Arc<dyn DeviceInfoPort>,
    /// The one device id this installation reports everywhere.
    pub device_id: DeviceId,
    pub events: InProcessNotificationEvents,
    pub native_tokens: Arc<NativeTokenRelay>,
}

/// Assemble the service graph.
///
/// `app_id` is the bundle identifier the push gateway scopes tokens to.
pub fn wire_services(
    config: &AppConfig,
    app_id: &str,
    ports: PlatformPorts,
) -> WiringResult<ShellServices> {
    let device_info: Arc<dyn DeviceInfoPort> = Arc::new(SystemDeviceInfo::detect());
    wire_with_device_info(config, app_id, ports, device_info)
}

fn wire_with_device_info(
    config: &AppConfig,
    app_id: &str,
    ports: PlatformPorts,
    device_info: Arc<dyn DeviceInfoPort>,
) -> WiringResult<ShellServices> {
    let PlatformPorts {
        permission,
        channels,
        scheduler,
        bridge,
        emitter,
    } = ports;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let token_store = create_token_store(config);
    let events = InProcessNotificationEvents::new();
    let native_tokens = Arc::new(NativeTokenRelay::new());

    let device_id = derive_device_id(device_info.as_ref(), clock.now_ms());
    let push_tokens: Arc<dyn PushTokenPort> = Arc::new(
        ExpoPushTokenClient::new(
            ExpoPushTokenConfig {
                gateway_url: config.push_gateway_url.clone(),
                app_id: app_id.to_string(),
                installation_id: device_id.as_str().to_string(),
                development: config.development,
            },
            native_tokens.clone(),
        )
        .map_err(|e| WiringError::PushClientInit(format!("{e:#}")))?,
    );

    let deps = NotificationDeps {
        device_info: device_info.clone(),
        device_id: device_id.clone(),
        permission,
        channels,
        push_tokens,
        events: Arc::new(events.clone()),
        scheduler,
        token_store: token_store.clone(),
        emitter,
    };

    if config.project_id.is_empty() {
        warn!("Push project id is empty; token requests will not be scoped");
    }
    let controller = Arc::new(NotificationLifecycleController::from_deps(
        deps,
        config.project_id.clone(),
    ));

    let registrations = Arc::new(RegistrationStore::new(token_store));
    let handshake = Arc::new(
        StartupHandshake::new(
            registrations.clone(),
            device_info.clone(),
            device_id.clone(),
            clock,
            bridge,
            Duration::from_millis(config.handshake_delay_ms),
        )
        .with_pipeline(controller.watch_phase()),
    );

    info!(
        platform = %device_info.platform(),
        physical = device_info.is_physical_device(),
        device_id = %device_id,
        "Shell services wired"
    );

    Ok(ShellServices {
        controller,
        handshake,
        registrations,
        device_info,
        device_id,
        events,
        native_tokens,
    })
}

fn create_token_store(config: &AppConfig) -> Arc<dyn TokenStorePort> {
    if config.token_store_path.as_os_str().is_empty() {
        warn!("No token store path configured, registrations will not survive restarts");
        return Arc::new(InMemoryTokenStore::new());
    }
    info!(path = %config.token_store_path.display(), "Using file token store");
    Arc::new(FileTokenStore::new(config.token_store_path.clone()))
}
