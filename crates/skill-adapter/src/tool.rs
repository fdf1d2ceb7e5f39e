//! Skill 到 Agent 工具的封装
//! Skill-to-agent-tool wrappers
//!
//! 把 Skill 以工具形式暴露给 Agent 框架：每个 Skill 一个渐进式披露
//! 工具（调用返回 Body），外加共享的 `use_script` 和 `read_reference`
//! 工具。适配层只触碰 Skill 的公开表面：glance、inspect、use_script、
//! read_reference 与标记派生的名称列表。

use crate::AgentTool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use skill_kernel::context::SkillContext;
use skill_kernel::error::{SkillError, SkillResult};
use skill_kernel::skill::Skill;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// SkillTool
// ============================================================================

/// 将单个 Skill 封装为工具
/// Wraps a single skill as a tool
///
/// 用于渐进式披露：无输入，输出为 Skill 的 Body。Agent 先读 Body，
/// 再按其中的标记调用 `use_script` / `read_reference`。
pub struct SkillTool {
    skill: Arc<Skill>,
}

impl SkillTool {
    /// 创建一个新的 SkillTool
    pub fn new(skill: Arc<Skill>) -> Self {
        Self { skill }
    }
}

#[async_trait]
impl AgentTool for SkillTool {
    fn name(&self) -> &str {
        &self.skill.metadata.name
    }

    fn description(&self) -> &str {
        &self.skill.metadata.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        // 空参数表示不需要输入
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn call(&self, _ctx: &SkillContext, _args: &str) -> SkillResult<String> {
        Ok(self.skill.inspect().to_string())
    }
}

// ============================================================================
// UseScriptTool
// ============================================================================

/// `use_script` 工具的请求参数
#[derive(Debug, Deserialize)]
struct UseScriptRequest {
    skill_name: String,
    script_name: String,
    #[serde(default)]
    args: String,
}

/// 执行 Skill 中特定脚本的共享工具
/// Shared tool that runs a named script of a named skill
pub struct UseScriptTool {
    // skill name -> skill
    skills: HashMap<String, Arc<Skill>>,
}

impl UseScriptTool {
    /// 创建一个新的 UseScriptTool
    pub fn new(skills: impl IntoIterator<Item = Arc<Skill>>) -> Self {
        Self {
            skills: index_by_name(skills),
        }
    }
}

#[async_trait]
impl AgentTool for UseScriptTool {
    fn name(&self) -> &str {
        "use_script"
    }

    fn description(&self) -> &str {
        "Execute a specific script from a skill. Call this after getting the skill \
         body to run scripts referenced in <script> tags."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "skill_name": {
                    "type": "string",
                    "description": "The name of the skill to use"
                },
                "script_name": {
                    "type": "string",
                    "description": "The name of the script to execute (found in <script> tags)"
                },
                "args": {
                    "type": "string",
                    "description": "JSON string of arguments to pass to the script"
                }
            },
            "required": ["skill_name", "script_name"]
        })
    }

    async fn call(&self, ctx: &SkillContext, args: &str) -> SkillResult<String> {
        let request: UseScriptRequest = serde_json::from_str(args)?;

        let skill = self
            .skills
            .get(&request.skill_name)
            .ok_or_else(|| SkillError::SkillNotFound(request.skill_name.clone()))?;

        tracing::debug!(
            skill = %request.skill_name,
            script = %request.script_name,
            "running script through adapter"
        );
        skill
            .use_script(ctx, &request.script_name, &request.args)
            .await
    }
}

// ============================================================================
// ReadReferenceTool
// ============================================================================

/// `read_reference` 工具的请求参数
#[derive(Debug, Deserialize)]
struct ReadReferenceRequest {
    skill_name: String,
    reference_name: String,
}

/// 读取 Skill 中参考文档的共享工具
/// Shared tool that reads a named reference of a named skill
pub struct ReadReferenceTool {
    skills: HashMap<String, Arc<Skill>>,
}

impl ReadReferenceTool {
    /// 创建一个新的 ReadReferenceTool
    pub fn new(skills: impl IntoIterator<Item = Arc<Skill>>) -> Self {
        Self {
            skills: index_by_name(skills),
        }
    }
}

#[async_trait]
impl AgentTool for ReadReferenceTool {
    fn name(&self) -> &str {
        "read_reference"
    }

    fn description(&self) -> &str {
        "Read a reference document from a skill. Call this after getting the skill \
         body to read references mentioned in <reference> tags."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "skill_name": {
                    "type": "string",
                    "description": "The name of the skill to use"
                },
                "reference_name": {
                    "type": "string",
                    "description": "The name of the reference to read (found in <reference> tags)"
                }
            },
            "required": ["skill_name", "reference_name"]
        })
    }

    async fn call(&self, ctx: &SkillContext, args: &str) -> SkillResult<String> {
        let request: ReadReferenceRequest = serde_json::from_str(args)?;

        let skill = self
            .skills
            .get(&request.skill_name)
            .ok_or_else(|| SkillError::SkillNotFound(request.skill_name.clone()))?;

        skill.read_reference(ctx, &request.reference_name).await
    }
}

fn index_by_name(skills: impl IntoIterator<Item = Arc<Skill>>) -> HashMap<String, Arc<Skill>> {
    skills
        .into_iter()
        .map(|skill| (skill.metadata.name.clone(), skill))
        .collect()
}
