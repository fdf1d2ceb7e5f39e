//! Store round-trip demo
//!
//! Persists a skill to a filesystem store, loads it back through the
//! manager with a re-attached provider, and runs it.
//!
//! Run with: cargo run --example store_demo -p skill-store

use skill_kernel::prelude::*;
use skill_store::{FileStore, SkillManager, SkillStore, StoreConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = SkillContext::default();
    let dir = std::env::temp_dir().join("skill-store-demo");

    let store = FileStore::new(&dir, StoreConfig::new().with_namespace("demo")).await?;

    // 入库：脚本不持久化，Body/参考文档/资源文件随存储往返
    let skill = SkillBuilder::new("notes", "Keeps notes")
        .body(format!("Use {}", embed_script("append")))
        .reference("format", "One note per line")
        .build();
    store.put(&ctx, &skill).await?;
    println!("saved to {}", dir.display());

    // 取回：由管理器重新附加脚本提供者
    let manager = SkillManager::new(Arc::new(store));
    manager
        .set_resource_provider(
            "notes",
            Arc::new(InlineProvider::new().with_script(
                FnScript::new("append", |_ctx, note: String| async move {
                    Ok(format!("appended: {note}"))
                })
                .into_dyn(),
            )),
        )
        .await;

    for metadata in manager.list_skills(&ctx).await? {
        println!("skill: {} — {}", metadata.name, metadata.description);
    }

    let result = manager
        .use_script(&ctx, "notes", "append", "\"buy milk\"")
        .await?;
    println!("append -> {result}");

    let report = manager
        .get_skill(&ctx, "notes")
        .await?
        .execute(&ctx, "\"buy milk\"")
        .await?;
    println!("\n{report}");

    Ok(())
}
