//! Typed errors for the store sub-system.

use skill_kernel::SkillError;
use thiserror::Error;

/// Store operation result type.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The requested skill is not present in the store.
    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    /// The skill being stored is structurally invalid (e.g. empty name).
    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    /// A required collaborator is missing or misconfigured.
    #[error("Store configuration error: {0}")]
    Config(String),

    /// The storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),

    /// An I/O error surfaced during a store operation.
    #[error("Store I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// A (de)serialization error surfaced during a store operation.
    #[error("Store serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Catch-all for errors that don't fit the above categories.
    #[error("{0}")]
    Other(String),
}

impl From<StoreError> for SkillError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SkillNotFound(name) => SkillError::SkillNotFound(name),
            other => SkillError::Store(other.to_string()),
        }
    }
}
