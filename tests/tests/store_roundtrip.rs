//! Store backends and the manager: persist, reload, re-attach providers.

use skill_kernel::prelude::*;
use skill_store::{
    EtcdStore, FileStore, MemoryStore, MockEtcdClient, SkillManager, SkillStore, StoreConfig,
};
use skill_testing::fixtures::shout_script;
use std::sync::Arc;

fn ctx() -> SkillContext {
    SkillContext::new("store-roundtrip")
}

fn persistable_skill() -> Skill {
    SkillBuilder::new("notes", "Keeps notes")
        .body(format!("Use {}", embed_script("append")))
        .script(shout_script("append"))
        .reference("format", "One note per line")
        .asset(Asset::new("template.pdf", vec![0x25, 0x50], AssetKind::Pdf))
        .build()
}

#[tokio::test]
async fn test_file_store_persists_serializable_resources() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), StoreConfig::default())
        .await
        .unwrap();

    store.put(&ctx(), &persistable_skill()).await.unwrap();
    let loaded = store.get(&ctx(), "notes").await.unwrap();

    // 元数据、Body、参考文档、资源文件随存储往返
    assert_eq!(loaded.metadata.name, "notes");
    assert_eq!(loaded.references[0].body, "One note per line");
    assert_eq!(loaded.assets[0].kind, AssetKind::Pdf);
    // 脚本与提供者不参与序列化
    assert!(loaded.scripts.is_empty());
    assert!(loaded.provider().is_none());
}

#[tokio::test]
async fn test_manager_reattaches_provider_after_retrieval() {
    let store = MemoryStore::new(StoreConfig::default());
    store.put(&ctx(), &persistable_skill()).await.unwrap();

    let manager = SkillManager::new(Arc::new(store));
    manager
        .set_resource_provider(
            "notes",
            Arc::new(InlineProvider::new().with_script(shout_script("append"))),
        )
        .await;

    // 取回的 Skill 脚本为空，但提供者已重新附加，脚本照常可用
    let result = manager
        .use_script(&ctx(), "notes", "append", "\"todo\"")
        .await
        .unwrap();
    assert_eq!(result, "\"TODO\"");

    let report = manager
        .get_skill(&ctx(), "notes")
        .await
        .unwrap()
        .execute(&ctx(), "\"todo\"")
        .await
        .unwrap();
    assert!(report.contains("[1] Script: append\nResult: \"TODO\"\n"));
}

#[tokio::test]
async fn test_etcd_store_behaves_like_other_backends() {
    let store = EtcdStore::new(
        Arc::new(MockEtcdClient::new()),
        StoreConfig::new().with_namespace("it"),
    );

    store.put(&ctx(), &persistable_skill()).await.unwrap();
    assert!(store.exists(&ctx(), "notes").await.unwrap());

    let listed = store.list(&ctx()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "notes");

    store.delete(&ctx(), "notes").await.unwrap();
    assert!(!store.exists(&ctx(), "notes").await.unwrap());
}

#[tokio::test]
async fn test_manager_namespaced_stores_stay_separate() {
    let dir = tempfile::tempdir().unwrap();

    let prod = FileStore::new(dir.path(), StoreConfig::new().with_namespace("prod"))
        .await
        .unwrap();
    prod.put(&ctx(), &persistable_skill()).await.unwrap();

    let dev = FileStore::new(dir.path(), StoreConfig::new().with_namespace("dev"))
        .await
        .unwrap();
    assert!(!dev.exists(&ctx(), "notes").await.unwrap());

    let manager = SkillManager::new(Arc::new(dev));
    assert!(manager.get_skill(&ctx(), "notes").await.is_err());
}
