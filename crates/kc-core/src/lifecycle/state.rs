use serde::{Deserialize, Serialize};

/// Phase of the registration lifecycle.
///
/// 注册生命周期阶段。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// Not started (before mount).
    ///
    /// 尚未开始。
    #[default]
    Idle,
    /// An initialize attempt is in flight.
    ///
    /// 初始化进行中。
    Initializing,
    /// Token acquired, persisted and listeners subscribed.
    ///
    /// 令牌已获取、持久化并完成监听注册。
    Ready,
    /// The most recent attempt failed.
    ///
    /// 最近一次初始化失败。
    Failed,
}

impl LifecyclePhase {
    /// The last attempt has finished, successfully or not.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// UI-facing snapshot of the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleState {
    pub push_token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}
