//! 资源提供者接口与内联实现
//! Resource provider interface and the inline implementation

use crate::context::SkillContext;
use crate::error::{SkillError, SkillResult};
use crate::resources::asset::Asset;
use crate::resources::reference::Reference;
use crate::resources::script::Script;
use async_trait::async_trait;
use std::sync::Arc;

/// 统一资源提供者接口
/// Unified resource provider interface
///
/// 用于从各种来源（内存、文件、远程服务）获取 Skill 的资源。
/// 提供者自身不强制名称唯一性，这是调用方层面的不变量。
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// 获取指定名称的脚本
    /// Get the script with the given name
    async fn get_script(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<dyn Script>>;

    /// 获取指定名称的参考文档内容
    /// Get the reference body with the given name
    async fn get_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String>;

    /// 获取指定名称的资源文件
    /// Get the asset with the given name
    async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset>;

    /// 列出所有可用的脚本名称
    /// List all available script names
    async fn list_scripts(&self, ctx: &SkillContext) -> SkillResult<Vec<String>>;

    /// 列出所有可用的参考文档名称
    /// List all available reference names
    async fn list_references(&self, ctx: &SkillContext) -> SkillResult<Vec<String>>;

    /// 列出所有可用的资源文件名称
    /// List all available asset names
    async fn list_assets(&self, ctx: &SkillContext) -> SkillResult<Vec<String>>;
}

/// 内联资源提供者
/// Inline resource provider
///
/// 从内存中的三组资源提供查找，查找是按名称的线性扫描，
/// 列表按插入顺序返回。
#[derive(Default)]
pub struct InlineProvider {
    scripts: Vec<Arc<dyn Script>>,
    references: Vec<Reference>,
    assets: Vec<Asset>,
}

impl InlineProvider {
    /// 创建一个新的内联资源提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加脚本到提供者
    pub fn add_script(&mut self, script: Arc<dyn Script>) {
        self.scripts.push(script);
    }

    /// 添加参考文档到提供者
    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// 添加资源文件到提供者
    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// 链式添加脚本
    pub fn with_script(mut self, script: Arc<dyn Script>) -> Self {
        self.add_script(script);
        self
    }

    /// 链式添加参考文档
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.add_reference(reference);
        self
    }

    /// 链式添加资源文件
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.add_asset(asset);
        self
    }
}

#[async_trait]
impl ResourceProvider for InlineProvider {
    async fn get_script(&self, _ctx: &SkillContext, name: &str) -> SkillResult<Arc<dyn Script>> {
        self.scripts
            .iter()
            .find(|script| script.name() == name)
            .cloned()
            .ok_or_else(|| SkillError::ScriptNotFound(name.to_string()))
    }

    async fn get_reference(&self, _ctx: &SkillContext, name: &str) -> SkillResult<String> {
        self.references
            .iter()
            .find(|reference| reference.name == name)
            .map(|reference| reference.body.clone())
            .ok_or_else(|| SkillError::ReferenceNotFound(name.to_string()))
    }

    async fn get_asset(&self, _ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        self.assets
            .iter()
            .find(|asset| asset.name == name)
            .cloned()
            .ok_or_else(|| SkillError::AssetNotFound(name.to_string()))
    }

    async fn list_scripts(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
        Ok(self
            .scripts
            .iter()
            .map(|script| script.name().to_string())
            .collect())
    }

    async fn list_references(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
        Ok(self
            .references
            .iter()
            .map(|reference| reference.name.clone())
            .collect())
    }

    async fn list_assets(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
        Ok(self.assets.iter().map(|asset| asset.name.clone()).collect())
    }
}
