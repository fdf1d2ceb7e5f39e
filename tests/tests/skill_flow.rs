//! End-to-end skill flows: resolution order, orchestration, provider stacks.

use skill_kernel::prelude::*;
use skill_testing::fixtures::{CountingProvider, batch_skill, shout_script};
use skill_testing::{assert_outcome_err, assert_outcome_ok};
use std::sync::Arc;

fn ctx() -> SkillContext {
    SkillContext::new("integration")
}

#[tokio::test]
async fn test_glance_inspect_surface() {
    let skill = batch_skill();

    let glance: serde_json::Value = serde_json::from_str(&skill.glance()).unwrap();
    assert_eq!(glance["name"], "batch");
    assert!(skill.inspect().contains("<script>shout</script>"));
    assert_eq!(
        skill.script_names(),
        Some(vec!["shout".to_string(), "explode".to_string()])
    );
}

#[tokio::test]
async fn test_auto_execute_reports_partial_failure() {
    let skill = batch_skill();

    let outcomes = skill.auto_execute(&ctx(), "\"hi\"").await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_outcome_ok!(outcomes[0], "\"HI\"");
    assert_outcome_err!(outcomes[1]);
}

#[tokio::test]
async fn test_execute_renders_both_outcomes() {
    let skill = batch_skill();

    let report = skill.execute(&ctx(), "\"hi\"").await.unwrap();
    assert!(report.starts_with("Skill: batch\n"));
    assert!(report.contains("[1] Script: shout\nResult: \"HI\"\n"));
    assert!(report.contains("[2] Script: explode\nError: "));
}

#[tokio::test]
async fn test_provider_stack_composite_caching_lazy() {
    // 底层：两个内联提供者，组合后前者优先
    let primary = Arc::new(
        InlineProvider::new()
            .with_script(shout_script("shared"))
            .with_reference(Reference::new("guide", "primary guide")),
    );
    let secondary = Arc::new(
        InlineProvider::new()
            .with_reference(Reference::new("guide", "secondary guide"))
            .with_reference(Reference::new("extra", "secondary extra")),
    );

    let composite = Arc::new(
        CompositeProvider::default()
            .with_provider(primary)
            .with_provider(secondary),
    );

    let counting = Arc::new(CountingProvider::new(composite));
    let caching = Arc::new(CachingProvider::new(counting.clone()));

    let lazy_target = caching.clone();
    let provider = Arc::new(LazyProvider::new(move |_ctx| {
        let target: Arc<dyn ResourceProvider> = lazy_target.clone();
        async move { Ok(target) }
    }));

    let skill = SkillBuilder::new("stacked", "provider stack demo")
        .provider(provider)
        .build();

    // 组合优先级：guide 来自 primary
    assert_eq!(
        skill.read_reference(&ctx(), "guide").await.unwrap(),
        "primary guide"
    );
    // 并集回退：extra 只在 secondary
    assert_eq!(
        skill.read_reference(&ctx(), "extra").await.unwrap(),
        "secondary extra"
    );

    // 缓存生效：重复读取不再穿透
    let after_first = counting.calls();
    for _ in 0..3 {
        skill.read_reference(&ctx(), "guide").await.unwrap();
    }
    assert_eq!(counting.calls(), after_first);

    // 脚本经由同一栈解析并执行
    let result = skill.use_script(&ctx(), "shared", "\"ok\"").await.unwrap();
    assert_eq!(result, "\"OK\"");
}

#[tokio::test]
async fn test_provider_listing_through_stack() {
    let provider = Arc::new(
        InlineProvider::new()
            .with_script(shout_script("a"))
            .with_script(shout_script("b")),
    );
    let caching = CachingProvider::new(provider);

    let names = caching.list_scripts(&ctx()).await.unwrap();
    assert_eq!(names, vec!["a", "b"]);
}
