//! The tool adapter drives skills exactly through their public surface.

use skill_adapter::{AgentTool, to_tools};
use skill_kernel::prelude::*;
use skill_testing::fixtures::shout_script;
use std::sync::Arc;

fn ctx() -> SkillContext {
    SkillContext::new("adapter")
}

fn skills() -> Vec<Arc<Skill>> {
    vec![
        Arc::new(
            SkillBuilder::new("notes", "Keeps notes")
                .body(format!(
                    "Use {} and read {}",
                    embed_script("append"),
                    embed_reference("format"),
                ))
                .script(shout_script("append"))
                .reference("format", "One note per line")
                .build(),
        ),
        Arc::new(SkillBuilder::new("empty", "Nothing inside").build()),
    ]
}

#[tokio::test]
async fn test_progressive_disclosure_flow() {
    let tools = to_tools(skills());
    assert_eq!(tools.len(), 4);

    // 1. Agent 先调用 skill 工具拿到 Body
    let skill_tool = &tools[0];
    let body = skill_tool.call(&ctx(), "{}").await.unwrap();
    assert!(body.contains("<script>append</script>"));

    // 2. 按 Body 中的标记调用 use_script
    let use_script = tools
        .iter()
        .find(|tool| tool.name() == "use_script")
        .unwrap();
    let result = use_script
        .call(
            &ctx(),
            r#"{"skill_name":"notes","script_name":"append","args":"\"milk\""}"#,
        )
        .await
        .unwrap();
    assert_eq!(result, "\"MILK\"");

    // 3. 再读参考文档
    let read_reference = tools
        .iter()
        .find(|tool| tool.name() == "read_reference")
        .unwrap();
    let text = read_reference
        .call(&ctx(), r#"{"skill_name":"notes","reference_name":"format"}"#)
        .await
        .unwrap();
    assert_eq!(text, "One note per line");
}

#[tokio::test]
async fn test_tool_errors_carry_names() {
    let tools = to_tools(skills());
    let use_script = tools
        .iter()
        .find(|tool| tool.name() == "use_script")
        .unwrap();

    let err = use_script
        .call(&ctx(), r#"{"skill_name":"ghost","script_name":"x"}"#)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Skill not found: ghost");

    let err = use_script
        .call(&ctx(), r#"{"skill_name":"notes","script_name":"missing"}"#)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Script not found: missing");
}

#[test]
fn test_schemas_are_json_objects() {
    for tool in to_tools(skills()) {
        let schema = tool.parameters_schema();
        assert_eq!(schema["type"], "object");
    }
}
