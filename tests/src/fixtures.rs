//! Reusable skills, scripts and providers for integration tests.

use skill_kernel::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An uppercasing echo script under the given name.
pub fn shout_script(name: &str) -> Arc<dyn Script> {
    FnScript::new(name, |_ctx, input: String| async move {
        Ok(input.to_uppercase())
    })
    .into_dyn()
}

/// A script that always fails with an execution error.
pub fn failing_script(name: &str) -> Arc<dyn Script> {
    FnScript::new(name, |_ctx, _input: String| async move {
        Err::<String, _>(SkillError::ExecutionFailed("scripted failure".into()))
    })
    .into_dyn()
}

/// A skill whose body references `shout` and `explode`, with both inline.
pub fn batch_skill() -> Skill {
    SkillBuilder::new("batch", "Runs two scripts in order")
        .body(format!(
            "First {} then {}",
            embed_script("shout"),
            embed_script("explode"),
        ))
        .script(shout_script("shout"))
        .script(failing_script("explode"))
        .build()
}

/// A provider that counts how many lookups reached it.
pub struct CountingProvider {
    inner: Arc<dyn ResourceProvider>,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: Arc<dyn ResourceProvider>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceProvider for CountingProvider {
    async fn get_script(
        &self,
        ctx: &SkillContext,
        name: &str,
    ) -> SkillResult<Arc<dyn Script>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_script(ctx, name).await
    }

    async fn get_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_reference(ctx, name).await
    }

    async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_asset(ctx, name).await
    }

    async fn list_scripts(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_scripts(ctx).await
    }

    async fn list_references(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_references(ctx).await
    }

    async fn list_assets(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_assets(ctx).await
    }
}
