//! Skill 的 Agent 工具适配层
//! Agent-tool adapter for skills
//!
//! 给 Agent 框架暴露的完整契约是 Skill 的公开表面（glance、inspect、
//! use_script、read_reference、auto_execute、execute 与名称列表）；
//! 本 crate 把它适配成工具形式。

use async_trait::async_trait;
use skill_kernel::context::SkillContext;
use skill_kernel::error::SkillResult;

pub mod convert;
pub mod tool;

pub use convert::to_tools;
pub use tool::{ReadReferenceTool, SkillTool, UseScriptTool};

/// Agent 工具 Trait
/// Agent tool trait
///
/// 工具以 JSON Schema 描述参数，以 JSON 字符串进出执行。
#[async_trait]
pub trait AgentTool: Send + Sync {
    /// 工具名称 (唯一标识符)
    /// Tool name (unique identifier)
    fn name(&self) -> &str;

    /// 工具描述 (用于 LLM 理解)
    /// Tool description (for LLM understanding)
    fn description(&self) -> &str;

    /// 参数 JSON Schema
    /// Parameters JSON Schema
    fn parameters_schema(&self) -> serde_json::Value;

    /// 执行工具
    /// Execute the tool
    async fn call(&self, ctx: &SkillContext, args: &str) -> SkillResult<String>;
}
