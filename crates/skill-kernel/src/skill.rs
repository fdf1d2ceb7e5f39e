//! Skill 聚合实体与执行编排
//! Skill aggregate and execution orchestration
//!
//! [`Skill`] 在一个身份下聚合脚本、参考文档和资源文件，并通过统一的
//! 按名查找/执行表面暴露它们。解析顺序契约：附加的
//! [`ResourceProvider`]（若有）优先，未命中时回退到内联资源。

use crate::context::SkillContext;
use crate::error::{SkillError, SkillResult};
use crate::markup::{self, MarkupTag};
use crate::resources::asset::Asset;
use crate::resources::provider::ResourceProvider;
use crate::resources::reference::Reference;
use crate::resources::script::Script;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

/// Skill 元数据
/// Skill metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
}

impl SkillMetadata {
    /// 创建新的元数据
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// 脚本执行结果
/// Per-script execution outcome
///
/// 批量执行不会因单个脚本失败而中止，失败记录在条目里。
#[derive(Debug)]
pub struct ScriptOutcome {
    pub script_name: String,
    /// 执行结果（失败时为空）
    pub result: String,
    /// 执行错误（成功时为 None）
    pub error: Option<SkillError>,
}

/// Skill 聚合实体
/// The Skill aggregate
///
/// 通过 [`SkillBuilder`](crate::builder::SkillBuilder) 构造，构造后除
/// 显式重新附加提供者外不再变更。提供者是外部构造的共享协作者，
/// Skill 只持有引用；序列化只覆盖元数据、Body、参考文档和资源文件
/// （脚本与提供者不可序列化，取回后由调用方重新附加）。
///
/// # 示例
/// # Example
///
/// ```rust,ignore
/// use skill_kernel::builder::SkillBuilder;
/// use skill_kernel::resources::FnScript;
///
/// let skill = SkillBuilder::new("time", "Tells the time")
///     .body("Run <script>now</script> to get the time")
///     .script(FnScript::new("now", |_ctx, _: serde_json::Value| async move {
///         Ok("12:00".to_string())
///     }).into_dyn())
///     .build();
///
/// let report = skill.execute(&ctx, "{}").await?;
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Skill {
    pub metadata: SkillMetadata,
    #[serde(default)]
    pub body: String,
    #[serde(skip)]
    pub scripts: Vec<Arc<dyn Script>>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub assets: Vec<Asset>,

    // 共享协作者与解析缓存，不参与序列化
    #[serde(skip)]
    provider: Option<Arc<dyn ResourceProvider>>,
    #[serde(skip)]
    parsed_tags: OnceLock<Vec<MarkupTag>>,
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("metadata", &self.metadata)
            .field("body", &self.body)
            .field("scripts", &self.scripts)
            .field("references", &self.references)
            .field("assets", &self.assets)
            .field("provider", &self.provider.as_ref().map(|_| "<provider>"))
            .finish()
    }
}

impl Skill {
    /// 创建空 Skill（通常经由 builder）
    pub fn new(metadata: SkillMetadata) -> Self {
        Self {
            metadata,
            body: String::new(),
            scripts: Vec::new(),
            references: Vec::new(),
            assets: Vec::new(),
            provider: None,
            parsed_tags: OnceLock::new(),
        }
    }

    /// 元数据的紧凑 JSON 视图
    /// Compact JSON view of the metadata
    pub fn glance(&self) -> String {
        serde_json::to_string(&self.metadata).unwrap_or_default()
    }

    /// 原始 Body 文本
    /// The raw body text, unchanged
    pub fn inspect(&self) -> &str {
        &self.body
    }

    /// 附加（或替换）资源提供者
    /// Attach (or replace) the resource provider
    pub fn attach_provider(&mut self, provider: Arc<dyn ResourceProvider>) {
        self.provider = Some(provider);
    }

    /// 当前附加的资源提供者
    pub fn provider(&self) -> Option<&Arc<dyn ResourceProvider>> {
        self.provider.as_ref()
    }

    /// 执行指定名称的脚本
    /// Run the script with the given name
    ///
    /// 先查附加的提供者；提供者未命中（NotFound 族）或未附加时回退
    /// 到内联脚本列表。名称冲突时提供者的命名空间优先。提供者的
    /// 其他错误（传输失败、懒加载工厂失败）原样向上传播。
    pub async fn use_script(
        &self,
        ctx: &SkillContext,
        name: &str,
        args: &str,
    ) -> SkillResult<String> {
        if let Some(provider) = &self.provider {
            match provider.get_script(ctx, name).await {
                Ok(script) => return script.run(ctx, args).await,
                Err(e) if e.is_not_found() => {
                    tracing::debug!(script = name, "provider miss, falling back to inline scripts");
                }
                Err(e) => return Err(e),
            }
        }

        for script in &self.scripts {
            if script.name() == name {
                return script.run(ctx, args).await;
            }
        }
        Err(SkillError::ScriptNotFound(name.to_string()))
    }

    /// 读取指定名称的参考文档
    /// Read the reference with the given name
    ///
    /// 与 [`use_script`](Skill::use_script) 相同的两级解析策略。
    pub async fn read_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String> {
        if let Some(provider) = &self.provider {
            match provider.get_reference(ctx, name).await {
                Ok(reference) => return Ok(reference),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        self.references
            .iter()
            .find(|reference| reference.name == name)
            .map(|reference| reference.body.clone())
            .ok_or_else(|| SkillError::ReferenceNotFound(name.to_string()))
    }

    /// 获取指定名称的资源文件
    /// Get the asset with the given name
    pub async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        if let Some(provider) = &self.provider {
            match provider.get_asset(ctx, name).await {
                Ok(asset) => return Ok(asset),
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        self.assets
            .iter()
            .find(|asset| asset.name == name)
            .cloned()
            .ok_or_else(|| SkillError::AssetNotFound(name.to_string()))
    }

    // ========================================================================
    // Body 标记 (Body markup)
    // ========================================================================

    /// Body 中的标记（首次访问时解析并缓存）
    /// Tags in the body (parsed and cached on first access)
    pub fn parsed_tags(&self) -> &[MarkupTag] {
        self.parsed_tags
            .get_or_init(|| markup::parse_tags(&self.body))
    }

    /// Body 中引用的所有脚本名称
    pub fn script_names(&self) -> Option<Vec<String>> {
        markup::extract_script_names(&self.body)
    }

    /// Body 中引用的所有参考文档名称
    pub fn reference_names(&self) -> Option<Vec<String>> {
        markup::extract_reference_names(&self.body)
    }

    /// Body 中引用的所有资源文件名称
    pub fn asset_names(&self) -> Option<Vec<String>> {
        markup::extract_asset_names(&self.body)
    }

    /// Body 中是否包含标记
    pub fn has_markup(&self) -> bool {
        markup::has_tags(&self.body)
    }

    // ========================================================================
    // 编排 (Orchestration)
    // ========================================================================

    /// 自动执行 Body 中所有 `<script>` 标记对应的脚本
    /// Run every script referenced in the body, in occurrence order
    ///
    /// 按出现顺序依次执行并返回所有结果；单个脚本失败不会中止批次，
    /// 错误记录在对应条目中。Body 中没有脚本引用时返回
    /// [`SkillError::NoScriptsFound`]。
    pub async fn auto_execute(
        &self,
        ctx: &SkillContext,
        args: &str,
    ) -> SkillResult<Vec<ScriptOutcome>> {
        let script_names = self.script_names().ok_or(SkillError::NoScriptsFound)?;

        let mut outcomes = Vec::with_capacity(script_names.len());
        for script_name in script_names {
            match self.use_script(ctx, &script_name, args).await {
                Ok(result) => outcomes.push(ScriptOutcome {
                    script_name,
                    result,
                    error: None,
                }),
                Err(e) => {
                    tracing::debug!(script = %script_name, error = %e, "script failed, continuing batch");
                    outcomes.push(ScriptOutcome {
                        script_name,
                        result: String::new(),
                        error: Some(e),
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// 执行完整的 Skill 逻辑并渲染报告
    /// Run the full skill and render a report
    ///
    /// 调用 [`auto_execute`](Skill::auto_execute)，把每个脚本的结果或
    /// 错误按顺序渲染成一个可读的报告字符串。只有 `auto_execute` 本身
    /// 失败（如没有脚本）才返回错误，单个脚本的错误渲染在报告内。
    pub async fn execute(&self, ctx: &SkillContext, args: &str) -> SkillResult<String> {
        let outcomes = self.auto_execute(ctx, args).await?;

        let mut output = format!("Skill: {}\n", self.metadata.name);
        for (i, outcome) in outcomes.iter().enumerate() {
            let _ = write!(output, "\n[{}] Script: {}\n", i + 1, outcome.script_name);
            match &outcome.error {
                Some(e) => {
                    let _ = write!(output, "Error: {e}\n");
                }
                None => {
                    let _ = write!(output, "Result: {}\n", outcome.result);
                }
            }
        }

        Ok(output)
    }
}
