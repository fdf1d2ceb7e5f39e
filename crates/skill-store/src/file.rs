//! 基于文件系统的 Skill 存储实现
//! Filesystem-backed skill store
//!
//! 每个 Skill 存储为一个 JSON 文件。

use crate::error::{StoreError, StoreResult};
use crate::store::{SkillStore, StoreConfig, validate_for_put};
use async_trait::async_trait;
use skill_kernel::context::SkillContext;
use skill_kernel::skill::{Skill, SkillMetadata};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// 文件系统 Skill 存储
/// Filesystem skill store
///
/// `base_path` 下每个 Skill 一个 `.json` 文件；命名空间作为文件名前缀。
pub struct FileStore {
    base_path: PathBuf,
    config: StoreConfig,
    // 串行化同一进程内的写操作；跨进程一致性不在保证范围内
    lock: RwLock<()>,
}

impl FileStore {
    /// 创建一个新的文件系统 Skill 存储
    ///
    /// `base_path`: 存储 Skill 文件的根目录，不存在时自动创建。
    pub async fn new(base_path: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::Backend(format!(
                "failed to create directory {}: {e}",
                base_path.display()
            ))
        })?;

        Ok(Self {
            base_path,
            config,
            lock: RwLock::new(()),
        })
    }

    /// 存储根目录
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    // 生成 Skill 文件的完整路径
    fn file_path(&self, name: &str) -> PathBuf {
        let key = if self.config.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", self.config.namespace, name)
        };
        self.base_path.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SkillStore for FileStore {
    async fn get(&self, _ctx: &SkillContext, name: &str) -> StoreResult<Skill> {
        let _guard = self.lock.read().await;

        let path = self.file_path(name);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::SkillNotFound(name.to_string()));
            }
            Err(e) => return Err(StoreError::Backend(format!("failed to read skill file: {e}"))),
        };

        let skill: Skill = serde_json::from_slice(&data)?;
        Ok(skill)
    }

    async fn list(&self, _ctx: &SkillContext) -> StoreResult<Vec<SkillMetadata>> {
        let _guard = self.lock.read().await;

        let mut entries = tokio::fs::read_dir(&self.base_path)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to read directory: {e}")))?;

        let mut metadatas = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Backend(format!("failed to read directory: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            // 跳过无法读取或解析的文件
            let data = match tokio::fs::read(&path).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable skill file");
                    continue;
                }
            };
            match serde_json::from_slice::<Skill>(&data) {
                Ok(skill) => metadatas.push(skill.metadata),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unparsable skill file");
                }
            }
        }

        Ok(metadatas)
    }

    async fn put(&self, _ctx: &SkillContext, skill: &Skill) -> StoreResult<()> {
        validate_for_put(skill)?;

        let _guard = self.lock.write().await;

        let path = self.file_path(&skill.metadata.name);
        let data = serde_json::to_vec_pretty(skill)?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| StoreError::Backend(format!("failed to write skill file: {e}")))?;

        tracing::debug!(skill = %skill.metadata.name, path = %path.display(), "skill saved");
        Ok(())
    }

    async fn delete(&self, _ctx: &SkillContext, name: &str) -> StoreResult<()> {
        let _guard = self.lock.write().await;

        let path = self.file_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::SkillNotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Backend(format!(
                "failed to delete skill file: {e}"
            ))),
        }
    }

    async fn exists(&self, _ctx: &SkillContext, name: &str) -> StoreResult<bool> {
        let _guard = self.lock.read().await;
        Ok(tokio::fs::try_exists(self.file_path(name))
            .await
            .unwrap_or(false))
    }
}
