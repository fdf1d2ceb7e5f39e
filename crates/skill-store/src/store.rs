//! Storage trait for skills
//!
//! Defines the abstract storage interface implemented by the in-memory,
//! filesystem and etcd-shaped backends. A retrieved skill is structurally
//! complete (metadata, body, and the resources that serialize); resource
//! providers are not persisted — re-attaching one after retrieval is the
//! caller's responsibility.

use crate::error::StoreResult;
use async_trait::async_trait;
use skill_kernel::context::SkillContext;
use skill_kernel::skill::{Skill, SkillMetadata};

/// Skill 持久化存储接口
/// Skill persistence interface
///
/// 实现此接口可以把 Skill 存储到各种后端（内存、文件、etcd、数据库等）。
///
/// # Example
///
/// ```rust,ignore
/// use skill_store::{MemoryStore, SkillStore};
///
/// let store = MemoryStore::new(StoreConfig::default());
/// store.put(&ctx, &skill).await?;
/// let loaded = store.get(&ctx, "time_skill").await?;
/// ```
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Get the skill with the given name.
    ///
    /// Returns [`StoreError::SkillNotFound`](crate::StoreError::SkillNotFound)
    /// if the skill does not exist.
    async fn get(&self, ctx: &SkillContext, name: &str) -> StoreResult<Skill>;

    /// List the metadata of every stored skill.
    ///
    /// Lets callers browse available skills without loading full bodies.
    async fn list(&self, ctx: &SkillContext) -> StoreResult<Vec<SkillMetadata>>;

    /// Save a skill, creating it or replacing an existing one.
    async fn put(&self, ctx: &SkillContext, skill: &Skill) -> StoreResult<()>;

    /// Delete the skill with the given name.
    ///
    /// Deleting a missing skill is an error.
    async fn delete(&self, ctx: &SkillContext, name: &str) -> StoreResult<()>;

    /// Whether a skill with the given name exists.
    async fn exists(&self, ctx: &SkillContext, name: &str) -> StoreResult<bool>;
}

/// Store 配置
/// Store configuration
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// 命名空间，用于隔离不同环境的 Skill
    pub namespace: String,
    /// 键前缀
    pub prefix: String,
}

impl StoreConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置命名空间
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// 设置键前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

// 共用的写入校验：空名称的 Skill 不能入库
pub(crate) fn validate_for_put(skill: &Skill) -> StoreResult<()> {
    if skill.metadata.name.is_empty() {
        return Err(crate::error::StoreError::InvalidSkill(
            "skill metadata name cannot be empty".into(),
        ));
    }
    Ok(())
}
