//! Skill 执行上下文定义
//!
//! 统一的执行上下文，用于在 Skill、Provider 和脚本之间传递状态
//!
//! # 核心原则
//!
//! SkillContext 只包含内核原语（kernel primitives）：
//! - 基本的状态存储（K/V store）
//! - 中断信号与取消令牌
//! - 配置
//!
//! 业务逻辑（例如指标收集）不属于上下文。

use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Skill 上下文
// ============================================================================

/// Skill 执行上下文
///
/// 提供最小的内核原语用于脚本执行：
/// - 执行 ID 和会话 ID
/// - 通用键值存储
/// - 中断信号（同步检查）与取消令牌（异步等待）
/// - 配置
///
/// # 示例
///
/// ```rust,ignore
/// use skill_kernel::context::SkillContext;
///
/// let ctx = SkillContext::new("execution-123");
/// ctx.set("user_id", "user-456").await;
/// let value: Option<String> = ctx.get("user_id").await;
/// ```
#[derive(Clone)]
pub struct SkillContext {
    /// 执行 ID (唯一标识本次执行)
    pub execution_id: String,
    /// 会话 ID (用于多轮对话)
    pub session_id: Option<String>,
    /// 共享状态 (通用键值存储)
    state: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    /// 中断信号
    interrupt: Arc<InterruptSignal>,
    /// 取消令牌 (用于在途 I/O)
    cancel: CancellationToken,
    /// 配置
    config: Arc<ContextConfig>,
}

/// 上下文配置
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    /// 超时时间 (毫秒)
    pub timeout_ms: Option<u64>,
    /// 自定义配置
    pub custom: HashMap<String, serde_json::Value>,
}

impl SkillContext {
    /// 创建新的上下文
    pub fn new(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: execution_id.into(),
            session_id: None,
            state: Arc::new(RwLock::new(HashMap::new())),
            interrupt: Arc::new(InterruptSignal::new()),
            cancel: CancellationToken::new(),
            config: Arc::new(ContextConfig::default()),
        }
    }

    /// 创建带会话 ID 的上下文
    pub fn with_session(execution_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        let mut ctx = Self::new(execution_id);
        ctx.session_id = Some(session_id.into());
        ctx
    }

    /// 设置配置
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// 获取值
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let state = self.state.read().await;
        state
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 设置值
    pub async fn set<T: Serialize>(&self, key: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            let mut state = self.state.write().await;
            state.insert(key.to_string(), v);
        }
    }

    /// 检查是否存在值
    pub async fn contains(&self, key: &str) -> bool {
        let state = self.state.read().await;
        state.contains_key(key)
    }

    /// 检查是否被中断或取消
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_triggered() || self.cancel.is_cancelled()
    }

    /// 触发中断（同时取消在途 I/O）
    pub fn trigger_interrupt(&self) {
        self.interrupt.trigger();
        self.cancel.cancel();
    }

    /// 获取取消令牌（I/O 实现用 `select!` 监听）
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// 获取配置
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }
}

impl Default for SkillContext {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

// ============================================================================
// 中断信号
// ============================================================================

/// 中断信号
pub struct InterruptSignal {
    triggered: AtomicBool,
}

impl InterruptSignal {
    /// 创建新的中断信号
    pub fn new() -> Self {
        Self {
            triggered: AtomicBool::new(false),
        }
    }

    /// 检查是否已触发
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// 触发中断
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    /// 清除中断状态
    pub fn clear(&self) {
        self.triggered.store(false, Ordering::SeqCst);
    }
}

impl Default for InterruptSignal {
    fn default() -> Self {
        Self::new()
    }
}
