// context module
pub mod context;

// error module
pub mod error;

// markup module
pub mod markup;

// resources module (资源模型)
pub mod resources;

// skill aggregate (Skill 聚合)
pub mod skill;
pub mod builder;

pub use builder::SkillBuilder;
pub use context::{ContextConfig, SkillContext};
pub use error::{SkillError, SkillResult};
pub use markup::{MarkupTag, TagKind};
pub use skill::{ScriptOutcome, Skill, SkillMetadata};

/// 常用导出
/// Common exports
pub mod prelude {
    pub use crate::builder::SkillBuilder;
    pub use crate::context::SkillContext;
    pub use crate::error::{SkillError, SkillResult};
    pub use crate::markup::{embed_asset, embed_reference, embed_script};
    pub use crate::resources::{
        Asset, AssetKind, CachingProvider, CompositeProvider, FnScript, HttpScriptTransport,
        InlineProvider, LazyProvider, Reference, RemoteScript, ResourceProvider, Script,
        ScriptTransport,
    };
    pub use crate::skill::{ScriptOutcome, Skill, SkillMetadata};
    pub use async_trait::async_trait;
}
