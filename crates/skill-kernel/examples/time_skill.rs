//! Time skill demo
//!
//! Builds a skill with two typed scripts (current time, timezone info), a
//! usage reference and a markup body, then drives it through the public
//! surface: glance → inspect → use_script → execute.
//!
//! Run with: cargo run --example time_skill -p skill-kernel

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use skill_kernel::prelude::*;
use std::collections::HashMap;

/// 时间脚本输入参数
#[derive(Debug, Default, Deserialize)]
struct TimeInput {
    /// 时间格式: iso, date, time, unix
    #[serde(default)]
    format: String,
}

/// 时间脚本输出结果
#[derive(Debug, Serialize)]
struct TimeOutput {
    time: String,
    unix: i64,
    timezone: String,
}

async fn get_current_time(_ctx: SkillContext, input: TimeInput) -> SkillResult<TimeOutput> {
    let now = Local::now();
    let time = match input.format.as_str() {
        "unix" => now.timestamp().to_string(),
        "date" => now.format("%Y-%m-%d").to_string(),
        "time" => now.format("%H:%M:%S").to_string(),
        _ => now.to_rfc3339(),
    };

    Ok(TimeOutput {
        time,
        unix: now.timestamp(),
        timezone: now.offset().to_string(),
    })
}

async fn get_timezone(
    _ctx: SkillContext,
    _input: HashMap<String, serde_json::Value>,
) -> SkillResult<serde_json::Value> {
    let now = Local::now();
    Ok(serde_json::json!({
        "local_time": now.format("%Y-%m-%d %H:%M:%S").to_string(),
        "utc_time": Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "offset": now.offset().to_string(),
    }))
}

fn create_time_skill() -> Skill {
    let body = format!(
        "获取当前时间的 Skill\n\n第一步：{}\n第二步：{}\n参考：{}\n",
        embed_script("get_current_time"),
        embed_script("get_timezone"),
        embed_reference("usage_guide"),
    );

    SkillBuilder::new(
        "time_skill",
        "Get current time in various formats and timezone information",
    )
    .body(body)
    .script(
        FnScript::new("get_current_time", get_current_time)
            .with_usage("Formats the current time; args: {\"format\": \"iso|date|time|unix\"}")
            .into_dyn(),
    )
    .script(FnScript::new("get_timezone", get_timezone).into_dyn())
    .reference(
        "usage_guide",
        "Pass {\"format\": \"date\"} for a plain date, \"unix\" for a timestamp.",
    )
    .build()
}

#[tokio::main]
async fn main() -> SkillResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,skill_kernel=debug")),
        )
        .init();

    let skill = create_time_skill();
    let ctx = SkillContext::default();

    println!("glance : {}", skill.glance());
    println!("inspect:\n{}", skill.inspect());

    let result = skill
        .use_script(&ctx, "get_current_time", r#"{"format":"date"}"#)
        .await?;
    println!("get_current_time -> {result}");

    let guide = skill.read_reference(&ctx, "usage_guide").await?;
    println!("usage_guide -> {guide}");

    let report = skill.execute(&ctx, "{}").await?;
    println!("\n{report}");

    Ok(())
}
