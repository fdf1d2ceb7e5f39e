//! Fluent builder for composing [`Skill`] instances.
//!
//! A skill is assembled once from its parts — identity, body, inline
//! resources, optional provider — with options applied in the order they
//! are given. After `build()` the skill is immutable apart from an
//! explicit provider re-attachment.
//!
//! # Example
//!
//! ```rust,ignore
//! use skill_kernel::builder::SkillBuilder;
//! use skill_kernel::markup::embed_script;
//! use skill_kernel::resources::{Asset, AssetKind, FnScript};
//!
//! let skill = SkillBuilder::new("report", "Generates the weekly report")
//!     .body(format!("First {}", embed_script("collect")))
//!     .script(FnScript::new("collect", collect).into_dyn())
//!     .reference("format_guide", "Reports are markdown tables…")
//!     .asset(Asset::new("template.pptx", template_bytes, AssetKind::Pptx))
//!     .build();
//! ```

use crate::resources::asset::Asset;
use crate::resources::provider::ResourceProvider;
use crate::resources::reference::Reference;
use crate::resources::script::Script;
use crate::skill::{Skill, SkillMetadata};
use std::sync::Arc;

/// Fluent builder for [`Skill`].
pub struct SkillBuilder {
    metadata: SkillMetadata,
    body: String,
    scripts: Vec<Arc<dyn Script>>,
    references: Vec<Reference>,
    assets: Vec<Asset>,
    provider: Option<Arc<dyn ResourceProvider>>,
}

impl SkillBuilder {
    /// Create a builder with the skill's identity.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            metadata: SkillMetadata::new(name, description),
            body: String::new(),
            scripts: Vec::new(),
            references: Vec::new(),
            assets: Vec::new(),
            provider: None,
        }
    }

    /// Set the body text (may embed markup tags).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add an inline script.
    pub fn script(mut self, script: Arc<dyn Script>) -> Self {
        self.scripts.push(script);
        self
    }

    /// Add several inline scripts at once.
    pub fn scripts(mut self, scripts: impl IntoIterator<Item = Arc<dyn Script>>) -> Self {
        self.scripts.extend(scripts);
        self
    }

    /// Add an inline reference.
    pub fn reference(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.references.push(Reference::new(name, body));
        self
    }

    /// Add several inline references at once.
    pub fn references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    /// Add an inline asset.
    pub fn asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    /// Add several inline assets at once.
    pub fn assets(mut self, assets: impl IntoIterator<Item = Asset>) -> Self {
        self.assets.extend(assets);
        self
    }

    /// Attach a resource provider (shared, externally constructed).
    pub fn provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Assemble the skill.
    pub fn build(self) -> Skill {
        let mut skill = Skill::new(self.metadata);
        skill.body = self.body;
        skill.scripts = self.scripts;
        skill.references = self.references;
        skill.assets = self.assets;
        if let Some(provider) = self.provider {
            skill.attach_provider(provider);
        }
        skill
    }
}

impl Skill {
    /// Start building a skill with the given identity.
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> SkillBuilder {
        SkillBuilder::new(name, description)
    }
}
