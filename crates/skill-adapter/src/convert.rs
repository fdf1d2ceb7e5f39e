//! Skill 批量转换为工具
//! Batch conversion of skills into tools

use crate::AgentTool;
use crate::tool::{ReadReferenceTool, SkillTool, UseScriptTool};
use skill_kernel::skill::Skill;
use std::sync::Arc;

/// 将多个 Skill 转换为 Agent 工具
/// Convert skills into agent tools
///
/// 返回 n+2 个工具：每个 Skill 一个 [`SkillTool`]，外加共享的
/// [`UseScriptTool`] 和 [`ReadReferenceTool`]。空输入返回空列表。
pub fn to_tools(skills: Vec<Arc<Skill>>) -> Vec<Arc<dyn AgentTool>> {
    if skills.is_empty() {
        return Vec::new();
    }

    let mut tools: Vec<Arc<dyn AgentTool>> = Vec::with_capacity(skills.len() + 2);
    for skill in &skills {
        tools.push(Arc::new(SkillTool::new(skill.clone())));
    }

    tools.push(Arc::new(UseScriptTool::new(skills.clone())));
    tools.push(Arc::new(ReadReferenceTool::new(skills)));

    tools
}
