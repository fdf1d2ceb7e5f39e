//! 基于 etcd 的 Skill 存储实现
//! etcd-shaped skill store
//!
//! 展示如何基于外部 KV 存储实现 [`SkillStore`] 接口。存储逻辑
//! 完整实现在 [`EtcdClient`] 能力契约之上（用于解耦）；本 crate
//! 不内置真实的网络客户端，接入 etcd 时用
//! `etcd-client` 等库实现 [`EtcdClient`] 即可。
//!
//! ```rust,ignore
//! struct RealEtcdClient(etcd_client::Client);
//!
//! #[async_trait]
//! impl EtcdClient for RealEtcdClient { /* get/put/delete/list_prefix */ }
//!
//! let store = EtcdStore::new(
//!     Arc::new(RealEtcdClient(client)),
//!     StoreConfig::new().with_namespace("myapp"),
//! );
//! ```

use crate::error::{StoreError, StoreResult};
use crate::store::{SkillStore, StoreConfig, validate_for_put};
use async_trait::async_trait;
use skill_kernel::context::SkillContext;
use skill_kernel::skill::{Skill, SkillMetadata};
use std::collections::HashMap;
use std::sync::Arc;

/// etcd 客户端能力契约
/// The etcd client capability contract
///
/// 真实使用时可基于 `etcd-client` 实现；测试中用内存实现替代。
#[async_trait]
pub trait EtcdClient: Send + Sync {
    /// 读取单个键，不存在时返回 `None`
    async fn get(&self, ctx: &SkillContext, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// 写入单个键
    async fn put(&self, ctx: &SkillContext, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// 删除单个键，返回是否存在
    async fn delete(&self, ctx: &SkillContext, key: &str) -> StoreResult<bool>;

    /// 按前缀列出所有键值对
    async fn list_prefix(
        &self,
        ctx: &SkillContext,
        prefix: &str,
    ) -> StoreResult<Vec<(String, Vec<u8>)>>;
}

/// etcd Skill 存储
/// etcd skill store
///
/// 键布局：`{prefix}/{namespace}/{name}`，值为 Skill 的 JSON 编码。
pub struct EtcdStore {
    client: Arc<dyn EtcdClient>,
    prefix: String,
}

impl EtcdStore {
    /// 创建一个新的 etcd Skill 存储
    pub fn new(client: Arc<dyn EtcdClient>, config: StoreConfig) -> Self {
        let mut prefix = if config.prefix.is_empty() {
            "/skills".to_string()
        } else {
            config.prefix.clone()
        };
        if !config.namespace.is_empty() {
            prefix = format!("{}/{}", prefix, config.namespace);
        }

        Self { client, prefix }
    }

    // 生成 etcd 存储键
    fn key(&self, name: &str) -> String {
        format!("{}/{}", self.prefix, name)
    }
}

#[async_trait]
impl SkillStore for EtcdStore {
    async fn get(&self, ctx: &SkillContext, name: &str) -> StoreResult<Skill> {
        let value = self
            .client
            .get(ctx, &self.key(name))
            .await?
            .ok_or_else(|| StoreError::SkillNotFound(name.to_string()))?;

        let skill: Skill = serde_json::from_slice(&value)?;
        Ok(skill)
    }

    async fn list(&self, ctx: &SkillContext) -> StoreResult<Vec<SkillMetadata>> {
        let pairs = self.client.list_prefix(ctx, &self.prefix).await?;

        let mut metadatas = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            // 跳过无法解析的值
            match serde_json::from_slice::<Skill>(&value) {
                Ok(skill) => metadatas.push(skill.metadata),
                Err(e) => tracing::debug!(key = %key, error = %e, "skipping unparsable etcd value"),
            }
        }
        Ok(metadatas)
    }

    async fn put(&self, ctx: &SkillContext, skill: &Skill) -> StoreResult<()> {
        validate_for_put(skill)?;

        let value = serde_json::to_vec(skill)?;
        self.client
            .put(ctx, &self.key(&skill.metadata.name), value)
            .await
    }

    async fn delete(&self, ctx: &SkillContext, name: &str) -> StoreResult<()> {
        if self.client.delete(ctx, &self.key(name)).await? {
            Ok(())
        } else {
            Err(StoreError::SkillNotFound(name.to_string()))
        }
    }

    async fn exists(&self, ctx: &SkillContext, name: &str) -> StoreResult<bool> {
        Ok(self.client.get(ctx, &self.key(name)).await?.is_some())
    }
}

/// 用于测试的内存 etcd 客户端
/// In-memory etcd client for tests
#[derive(Default)]
pub struct MockEtcdClient {
    data: tokio::sync::RwLock<HashMap<String, Vec<u8>>>,
}

impl MockEtcdClient {
    /// 创建一个新的内存客户端
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EtcdClient for MockEtcdClient {
    async fn get(&self, _ctx: &SkillContext, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn put(&self, _ctx: &SkillContext, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, _ctx: &SkillContext, key: &str) -> StoreResult<bool> {
        Ok(self.data.write().await.remove(key).is_some())
    }

    async fn list_prefix(
        &self,
        _ctx: &SkillContext,
        prefix: &str,
    ) -> StoreResult<Vec<(String, Vec<u8>)>> {
        Ok(self
            .data
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
