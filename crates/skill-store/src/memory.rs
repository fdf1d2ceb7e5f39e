//! 内存中的 Skill 存储实现
//! In-memory skill store
//!
//! 适用于测试和开发环境，数据不会持久化。

use crate::error::{StoreError, StoreResult};
use crate::store::{SkillStore, StoreConfig, validate_for_put};
use async_trait::async_trait;
use skill_kernel::context::SkillContext;
use skill_kernel::skill::{Skill, SkillMetadata};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 内存 Skill 存储
/// In-memory skill store
pub struct MemoryStore {
    skills: RwLock<HashMap<String, Skill>>,
    config: StoreConfig,
}

impl MemoryStore {
    /// 创建一个新的内存 Skill 存储
    pub fn new(config: StoreConfig) -> Self {
        Self {
            skills: RwLock::new(HashMap::new()),
            config,
        }
    }

    // 生成存储键
    fn key(&self, name: &str) -> String {
        if self.config.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.config.namespace, name)
        }
    }

    /// 清空所有 Skills（仅用于测试）
    pub async fn clear(&self) {
        self.skills.write().await.clear();
    }

    /// 当前存储的 Skill 数量
    pub async fn len(&self) -> usize {
        self.skills.read().await.len()
    }

    /// 是否为空
    pub async fn is_empty(&self) -> bool {
        self.skills.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn get(&self, _ctx: &SkillContext, name: &str) -> StoreResult<Skill> {
        let skills = self.skills.read().await;
        skills
            .get(&self.key(name))
            // 返回副本以避免外部修改
            .cloned()
            .ok_or_else(|| StoreError::SkillNotFound(name.to_string()))
    }

    async fn list(&self, _ctx: &SkillContext) -> StoreResult<Vec<SkillMetadata>> {
        let skills = self.skills.read().await;
        Ok(skills.values().map(|skill| skill.metadata.clone()).collect())
    }

    async fn put(&self, _ctx: &SkillContext, skill: &Skill) -> StoreResult<()> {
        validate_for_put(skill)?;

        let mut skills = self.skills.write().await;
        skills.insert(self.key(&skill.metadata.name), skill.clone());
        Ok(())
    }

    async fn delete(&self, _ctx: &SkillContext, name: &str) -> StoreResult<()> {
        let mut skills = self.skills.write().await;
        skills
            .remove(&self.key(name))
            .map(|_| ())
            .ok_or_else(|| StoreError::SkillNotFound(name.to_string()))
    }

    async fn exists(&self, _ctx: &SkillContext, name: &str) -> StoreResult<bool> {
        let skills = self.skills.read().await;
        Ok(skills.contains_key(&self.key(name)))
    }
}
