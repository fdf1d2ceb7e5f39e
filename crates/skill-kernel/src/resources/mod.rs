//! Skill 资源模型
//! Skill resource model
//!
//! 三种资源：可执行脚本（[`Script`]）、参考文档（[`Reference`]）、
//! 资源文件（[`Asset`]），以及把它们从可插拔来源解析出来的
//! [`ResourceProvider`] 能力契约与四种组合实现。

pub mod asset;
pub mod composite;
pub mod provider;
pub mod reference;
pub mod remote;
pub mod script;

pub use asset::{Asset, AssetKind};
pub use composite::{CachingProvider, CompositeProvider, LazyProvider, ProviderLoader};
pub use provider::{InlineProvider, ResourceProvider};
pub use reference::Reference;
pub use remote::{
    HttpScriptTransport, MockScriptTransport, RemoteScript, ScriptCallRequest,
    ScriptCallResponse, ScriptTransport,
};
pub use script::{FnScript, Script, ScriptFunc};
