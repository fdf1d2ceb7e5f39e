//! Skill 错误类型定义
//!
//! 统一的 Skill 错误处理

use thiserror::Error;

/// Skill 操作结果类型
pub type SkillResult<T> = Result<T, SkillError>;

/// Skill 错误类型
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkillError {
    /// 脚本未找到
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    /// 参考文档未找到
    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// 资源文件未找到
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Skill 未找到
    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    /// 参数解码失败
    #[error("Failed to decode args for script '{script}': {source}")]
    Decode {
        script: String,
        #[source]
        source: serde_json::Error,
    },

    /// 结果编码失败
    #[error("Failed to encode result of script '{script}': {source}")]
    Encode {
        script: String,
        #[source]
        source: serde_json::Error,
    },

    /// 脚本执行失败
    #[error("Script execution failed: {0}")]
    ExecutionFailed(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 远程调用失败
    #[error("Transport error: {0}")]
    Transport(String),

    /// 超时错误
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// 中断错误
    #[error("Operation was interrupted")]
    Interrupted,

    /// Body 中没有可执行的脚本
    #[error("No scripts found in body")]
    NoScriptsFound,

    /// 存储错误
    #[error("Store error: {0}")]
    Store(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(String),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

impl SkillError {
    /// 创建解码错误
    pub fn decode(script: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            script: script.into(),
            source,
        }
    }

    /// 创建编码错误
    pub fn encode(script: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            script: script.into(),
            source,
        }
    }

    /// 创建超时错误
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// 是否属于 NotFound 族（携带查找的名称与资源类别）
    /// Whether this is one of the NotFound family (name + kind carrying)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ScriptNotFound(_)
                | Self::ReferenceNotFound(_)
                | Self::AssetNotFound(_)
                | Self::SkillNotFound(_)
        )
    }
}

impl From<std::io::Error> for SkillError {
    fn from(err: std::io::Error) -> Self {
        SkillError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SkillError {
    fn from(err: serde_json::Error) -> Self {
        SkillError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for SkillError {
    fn from(err: anyhow::Error) -> Self {
        SkillError::ExecutionFailed(err.to_string())
    }
}
