//! Skill 管理器
//! Skill manager
//!
//! 统一管理 Skill 的加载、缓存和生命周期：读取路径为
//! 缓存 → Store → 附加已注册的资源提供者 → 回填缓存。

use crate::error::StoreResult;
use crate::store::SkillStore;
use skill_kernel::context::SkillContext;
use skill_kernel::error::{SkillError, SkillResult};
use skill_kernel::resources::provider::ResourceProvider;
use skill_kernel::skill::{Skill, SkillMetadata};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Skill 管理器
/// The skill manager
///
/// 在 [`SkillStore`] 之上叠加一层内存缓存和按 Skill 的提供者注册表。
/// 提供者不参与持久化，Skill 从 Store 取回后由管理器重新附加。
pub struct SkillManager {
    store: Option<Arc<dyn SkillStore>>,
    cache: RwLock<HashMap<String, Arc<Skill>>>,
    // skill name -> provider
    providers: RwLock<HashMap<String, Arc<dyn ResourceProvider>>>,
}

impl SkillManager {
    /// 创建一个新的 Skill 管理器
    pub fn new(store: Arc<dyn SkillStore>) -> Self {
        Self {
            store: Some(store),
            cache: RwLock::new(HashMap::new()),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// 创建不带 Store 的管理器（只管理直接注册的 Skill）
    pub fn detached() -> Self {
        Self {
            store: None,
            cache: RwLock::new(HashMap::new()),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// 底层的 SkillStore
    pub fn store(&self) -> Option<&Arc<dyn SkillStore>> {
        self.store.as_ref()
    }

    fn require_store(&self) -> SkillResult<&Arc<dyn SkillStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| SkillError::Config("skill store not configured".into()))
    }

    // Store 加载 + 提供者附加，get_skill / reload_skill 共用
    async fn load_from_store(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<Skill>> {
        let store = self.require_store()?;
        let mut skill = store.get(ctx, name).await.map_err(SkillError::from)?;

        if let Some(provider) = self.providers.read().await.get(name) {
            skill.attach_provider(provider.clone());
        }

        let skill = Arc::new(skill);
        self.cache
            .write()
            .await
            .insert(name.to_string(), skill.clone());
        tracing::debug!(skill = name, "skill loaded from store");
        Ok(skill)
    }

    /// 获取指定名称的 Skill
    ///
    /// 优先从缓存获取，缓存未命中则从 Store 加载。
    pub async fn get_skill(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<Skill>> {
        if let Some(skill) = self.cache.read().await.get(name) {
            return Ok(skill.clone());
        }
        self.load_from_store(ctx, name).await
    }

    /// 直接注册一个 Skill 到管理器（不经过 Store）
    pub async fn register_skill(&self, skill: Skill) -> SkillResult<()> {
        if skill.metadata.name.is_empty() {
            return Err(SkillError::Config(
                "skill metadata name cannot be empty".into(),
            ));
        }

        let name = skill.metadata.name.clone();
        self.cache.write().await.insert(name, Arc::new(skill));
        Ok(())
    }

    /// 保存 Skill 到 Store 并更新缓存
    pub async fn save_skill(&self, ctx: &SkillContext, skill: Skill) -> SkillResult<()> {
        let store = self.require_store()?;
        store.put(ctx, &skill).await.map_err(SkillError::from)?;

        let name = skill.metadata.name.clone();
        self.cache.write().await.insert(name, Arc::new(skill));
        Ok(())
    }

    /// 重新从 Store 加载指定的 Skill（绕过缓存）
    pub async fn reload_skill(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<Skill>> {
        self.load_from_store(ctx, name).await
    }

    /// 从 Store 和缓存中删除指定的 Skill
    pub async fn delete_skill(&self, ctx: &SkillContext, name: &str) -> SkillResult<()> {
        let store = self.require_store()?;
        store.delete(ctx, name).await.map_err(SkillError::from)?;

        self.cache.write().await.remove(name);
        Ok(())
    }

    /// 列出所有可用的 Skill 元数据
    ///
    /// 没有 Store 时返回缓存中的元数据。
    pub async fn list_skills(&self, ctx: &SkillContext) -> SkillResult<Vec<SkillMetadata>> {
        match &self.store {
            Some(store) => store.list(ctx).await.map_err(SkillError::from),
            None => {
                let cache = self.cache.read().await;
                Ok(cache.values().map(|skill| skill.metadata.clone()).collect())
            }
        }
    }

    /// 执行指定 Skill 的脚本
    pub async fn use_script(
        &self,
        ctx: &SkillContext,
        skill_name: &str,
        script_name: &str,
        args: &str,
    ) -> SkillResult<String> {
        let skill = self.get_skill(ctx, skill_name).await?;
        skill.use_script(ctx, script_name, args).await
    }

    /// 读取指定 Skill 的参考文档
    pub async fn read_reference(
        &self,
        ctx: &SkillContext,
        skill_name: &str,
        reference_name: &str,
    ) -> SkillResult<String> {
        let skill = self.get_skill(ctx, skill_name).await?;
        skill.read_reference(ctx, reference_name).await
    }

    /// 清空 Skill 缓存
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// 当前缓存中的所有 Skill 名称
    pub async fn cached_skill_names(&self) -> Vec<String> {
        self.cache.read().await.keys().cloned().collect()
    }

    /// 为指定的 Skill 设置资源提供者
    ///
    /// Skill 已在缓存中时立即重新附加。
    pub async fn set_resource_provider(
        &self,
        skill_name: &str,
        provider: Arc<dyn ResourceProvider>,
    ) {
        self.providers
            .write()
            .await
            .insert(skill_name.to_string(), provider.clone());

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.get(skill_name) {
            let mut skill = (**cached).clone();
            skill.attach_provider(provider);
            cache.insert(skill_name.to_string(), Arc::new(skill));
        }
    }
}
