//! 组合资源提供者：优先级回退、缓存、懒加载
//! Provider compositions: priority fallback, caching, lazy loading

use crate::context::SkillContext;
use crate::error::{SkillError, SkillResult};
use crate::resources::asset::Asset;
use crate::resources::provider::ResourceProvider;
use crate::resources::script::Script;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

// ============================================================================
// CompositeProvider
// ============================================================================

/// 复合资源提供者
/// Composite resource provider
///
/// 组合多个提供者，按优先级顺序查找资源：排在前面的提供者优先，
/// 返回第一个成功的结果；全部失败时返回最后一个提供者的错误。
/// 列表操作取所有提供者名称集合的并集（去重），单个提供者列表失败
/// 不会中断聚合列表。
#[derive(Default)]
pub struct CompositeProvider {
    providers: Vec<Arc<dyn ResourceProvider>>,
}

impl CompositeProvider {
    /// 创建一个新的复合资源提供者
    pub fn new(providers: Vec<Arc<dyn ResourceProvider>>) -> Self {
        Self { providers }
    }

    /// 添加一个资源提供者（优先级低于已有提供者）
    pub fn add_provider(&mut self, provider: Arc<dyn ResourceProvider>) {
        self.providers.push(provider);
    }

    /// 链式添加提供者
    pub fn with_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.add_provider(provider);
        self
    }
}

// 并集去重：保持首次出现顺序
fn merge_names(seen: &mut HashSet<String>, names: &mut Vec<String>, listed: Vec<String>) {
    for name in listed {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
}

#[async_trait]
impl ResourceProvider for CompositeProvider {
    async fn get_script(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<dyn Script>> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.get_script(ctx, name).await {
                Ok(script) => return Ok(script),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| SkillError::ScriptNotFound(name.to_string())))
    }

    async fn get_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.get_reference(ctx, name).await {
                Ok(reference) => return Ok(reference),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| SkillError::ReferenceNotFound(name.to_string())))
    }

    async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        let mut last_err = None;
        for provider in &self.providers {
            match provider.get_asset(ctx, name).await {
                Ok(asset) => return Ok(asset),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| SkillError::AssetNotFound(name.to_string())))
    }

    async fn list_scripts(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for provider in &self.providers {
            match provider.list_scripts(ctx).await {
                Ok(listed) => merge_names(&mut seen, &mut names, listed),
                // 跳过出错的提供者
                Err(e) => tracing::debug!(error = %e, "skipping provider that failed to list scripts"),
            }
        }
        Ok(names)
    }

    async fn list_references(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for provider in &self.providers {
            match provider.list_references(ctx).await {
                Ok(listed) => merge_names(&mut seen, &mut names, listed),
                Err(e) => tracing::debug!(error = %e, "skipping provider that failed to list references"),
            }
        }
        Ok(names)
    }

    async fn list_assets(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for provider in &self.providers {
            match provider.list_assets(ctx).await {
                Ok(listed) => merge_names(&mut seen, &mut names, listed),
                Err(e) => tracing::debug!(error = %e, "skipping provider that failed to list assets"),
            }
        }
        Ok(names)
    }
}

// ============================================================================
// CachingProvider
// ============================================================================

/// 带缓存的资源提供者装饰器
/// Caching resource provider decorator
///
/// 点查找先查缓存，未命中时委托底层提供者并把成功结果写入缓存。
/// 缓存无上限、不自动失效，显式 `clear_cache` 清空。列表操作永远
/// 直接委托：缓存回答点查找，不回答枚举，避免列表陈旧。
///
/// 并发的首次查找可能都落到底层提供者并都写缓存（后写覆盖）——
/// 缓存值假定可幂等重算，这是记录在案的宽松语义。
pub struct CachingProvider {
    provider: Arc<dyn ResourceProvider>,
    script_cache: DashMap<String, Arc<dyn Script>>,
    reference_cache: DashMap<String, String>,
    asset_cache: DashMap<String, Asset>,
}

impl CachingProvider {
    /// 创建一个新的缓存资源提供者
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            script_cache: DashMap::new(),
            reference_cache: DashMap::new(),
            asset_cache: DashMap::new(),
        }
    }

    /// 清除所有缓存
    pub fn clear_cache(&self) {
        self.script_cache.clear();
        self.reference_cache.clear();
        self.asset_cache.clear();
        tracing::debug!("provider caches cleared");
    }

    /// 清除脚本缓存
    pub fn clear_script_cache(&self) {
        self.script_cache.clear();
    }

    /// 清除参考文档缓存
    pub fn clear_reference_cache(&self) {
        self.reference_cache.clear();
    }

    /// 清除资源文件缓存
    pub fn clear_asset_cache(&self) {
        self.asset_cache.clear();
    }
}

#[async_trait]
impl ResourceProvider for CachingProvider {
    async fn get_script(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<dyn Script>> {
        if let Some(script) = self.script_cache.get(name) {
            return Ok(script.clone());
        }
        let script = self.provider.get_script(ctx, name).await?;
        self.script_cache
            .insert(name.to_string(), script.clone());
        Ok(script)
    }

    async fn get_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String> {
        if let Some(reference) = self.reference_cache.get(name) {
            return Ok(reference.clone());
        }
        let reference = self.provider.get_reference(ctx, name).await?;
        self.reference_cache
            .insert(name.to_string(), reference.clone());
        Ok(reference)
    }

    async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        if let Some(asset) = self.asset_cache.get(name) {
            return Ok(asset.clone());
        }
        let asset = self.provider.get_asset(ctx, name).await?;
        self.asset_cache.insert(name.to_string(), asset.clone());
        Ok(asset)
    }

    // 列表不缓存
    async fn list_scripts(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.provider.list_scripts(ctx).await
    }

    async fn list_references(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.provider.list_references(ctx).await
    }

    async fn list_assets(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.provider.list_assets(ctx).await
    }
}

// ============================================================================
// LazyProvider
// ============================================================================

/// 提供者工厂函数类型
/// Provider factory function type
pub type ProviderLoader = Arc<
    dyn Fn(SkillContext) -> BoxFuture<'static, SkillResult<Arc<dyn ResourceProvider>>>
        + Send
        + Sync,
>;

/// 懒加载资源提供者
/// Lazy-loading resource provider
///
/// 首次访问任一操作时调用工厂恰好一次并保存结果提供者；之后的
/// 访问复用保存的提供者。初始化序列由互斥锁保护，并发的首次访问
/// 不会触发多次工厂调用。工厂失败只会使触发的调用失败，包装器
/// 保持未初始化，下次访问会重试工厂。
pub struct LazyProvider {
    loader: ProviderLoader,
    provider: Mutex<Option<Arc<dyn ResourceProvider>>>,
}

impl LazyProvider {
    /// 创建一个新的懒加载资源提供者
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn(SkillContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SkillResult<Arc<dyn ResourceProvider>>> + Send + 'static,
    {
        Self {
            loader: Arc::new(move |ctx| Box::pin(loader(ctx))),
            provider: Mutex::new(None),
        }
    }

    /// 是否已初始化
    pub async fn is_initialized(&self) -> bool {
        self.provider.lock().await.is_some()
    }

    // 锁覆盖检查-调用-保存全程，保证工厂至多调用一次
    async fn init(&self, ctx: &SkillContext) -> SkillResult<Arc<dyn ResourceProvider>> {
        let mut guard = self.provider.lock().await;
        if let Some(provider) = guard.as_ref() {
            return Ok(provider.clone());
        }

        match (self.loader)(ctx.clone()).await {
            Ok(provider) => {
                *guard = Some(provider.clone());
                tracing::debug!("lazy provider initialized");
                Ok(provider)
            }
            Err(e) => {
                tracing::warn!(error = %e, "lazy provider factory failed, will retry on next access");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ResourceProvider for LazyProvider {
    async fn get_script(&self, ctx: &SkillContext, name: &str) -> SkillResult<Arc<dyn Script>> {
        self.init(ctx).await?.get_script(ctx, name).await
    }

    async fn get_reference(&self, ctx: &SkillContext, name: &str) -> SkillResult<String> {
        self.init(ctx).await?.get_reference(ctx, name).await
    }

    async fn get_asset(&self, ctx: &SkillContext, name: &str) -> SkillResult<Asset> {
        self.init(ctx).await?.get_asset(ctx, name).await
    }

    async fn list_scripts(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.init(ctx).await?.list_scripts(ctx).await
    }

    async fn list_references(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.init(ctx).await?.list_references(ctx).await
    }

    async fn list_assets(&self, ctx: &SkillContext) -> SkillResult<Vec<String>> {
        self.init(ctx).await?.list_assets(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::provider::InlineProvider;
    use crate::resources::reference::Reference;
    use crate::resources::script::FnScript;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx() -> SkillContext {
        SkillContext::new("test-exec")
    }

    fn provider_with_reference(name: &str, body: &str) -> Arc<dyn ResourceProvider> {
        Arc::new(InlineProvider::new().with_reference(Reference::new(name, body)))
    }

    /// 所有操作都失败的提供者
    struct BrokenProvider;

    #[async_trait]
    impl ResourceProvider for BrokenProvider {
        async fn get_script(
            &self,
            _ctx: &SkillContext,
            _name: &str,
        ) -> SkillResult<Arc<dyn Script>> {
            Err(SkillError::Transport("backend down".into()))
        }

        async fn get_reference(&self, _ctx: &SkillContext, _name: &str) -> SkillResult<String> {
            Err(SkillError::Transport("backend down".into()))
        }

        async fn get_asset(&self, _ctx: &SkillContext, _name: &str) -> SkillResult<Asset> {
            Err(SkillError::Transport("backend down".into()))
        }

        async fn list_scripts(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
            Err(SkillError::Transport("backend down".into()))
        }

        async fn list_references(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
            Err(SkillError::Transport("backend down".into()))
        }

        async fn list_assets(&self, _ctx: &SkillContext) -> SkillResult<Vec<String>> {
            Err(SkillError::Transport("backend down".into()))
        }
    }

    /// 统计委托次数的提供者装饰器
    struct CountingProvider {
        inner: Arc<dyn ResourceProvider>,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(inner: Arc<dyn ResourceProvider>) -> Self {
            Self {
                inner,
                calls: AtomicUsize::new(0),
            }
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

    #[tokio::test]
    async fn test_composite_priority_is_stable() {
        let composite = CompositeProvider::default()
            .with_provider(provider_with_reference("x", "first"))
            .with_provider(provider_with_reference("x", "second"));

        // 重复调用始终命中第一个提供者
        for _ in 0..3 {
            assert_eq!(
                composite.get_reference(&ctx(), "x").await.unwrap(),
                "first"
            );
        }
    }

    #[tokio::test]
    async fn test_composite_falls_back_in_order() {
        let composite = CompositeProvider::default()
            .with_provider(provider_with_reference("a", "from a"))
            .with_provider(provider_with_reference("b", "from b"));

        assert_eq!(composite.get_reference(&ctx(), "b").await.unwrap(), "from b");
    }

    #[tokio::test]
    async fn test_composite_returns_last_error() {
        let composite = CompositeProvider::default()
            .with_provider(provider_with_reference("a", "from a"))
            .with_provider(Arc::new(BrokenProvider));

        let err = composite.get_reference(&ctx(), "missing").await.unwrap_err();
        assert!(matches!(err, SkillError::Transport(_)));
    }

    #[tokio::test]
    async fn test_composite_empty_is_not_found() {
        let composite = CompositeProvider::default();
        let err = composite.get_script(&ctx(), "x").await.unwrap_err();
        assert!(matches!(err, SkillError::ScriptNotFound(_)));
    }

    #[tokio::test]
    async fn test_composite_list_unions_and_skips_failures() {
        let composite = CompositeProvider::default()
            .with_provider(provider_with_reference("shared", "one"))
            .with_provider(Arc::new(BrokenProvider))
            .with_provider(Arc::new(
                InlineProvider::new()
                    .with_reference(Reference::new("shared", "two"))
                    .with_reference(Reference::new("extra", "three")),
            ));

        let names = composite.list_references(&ctx()).await.unwrap();
        assert_eq!(names, vec!["shared", "extra"]);
    }

    #[tokio::test]
    async fn test_caching_delegates_once_per_key() {
        let counting = Arc::new(CountingProvider::new(provider_with_reference(
            "guide", "text",
        )));
        let caching = CachingProvider::new(counting.clone());

        assert_eq!(caching.get_reference(&ctx(), "guide").await.unwrap(), "text");
        assert_eq!(caching.get_reference(&ctx(), "guide").await.unwrap(), "text");
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);

        caching.clear_cache();
        assert_eq!(caching.get_reference(&ctx(), "guide").await.unwrap(), "text");
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_caching_does_not_cache_failures() {
        let counting = Arc::new(CountingProvider::new(Arc::new(InlineProvider::new())));
        let caching = CachingProvider::new(counting.clone());

        assert!(caching.get_reference(&ctx(), "missing").await.is_err());
        assert!(caching.get_reference(&ctx(), "missing").await.is_err());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_caching_never_caches_listings() {
        let counting = Arc::new(CountingProvider::new(provider_with_reference(
            "guide", "text",
        )));
        let caching = CachingProvider::new(counting.clone());

        caching.list_references(&ctx()).await.unwrap();
        caching.list_references(&ctx()).await.unwrap();
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lazy_invokes_factory_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_loader = calls.clone();

        let lazy = LazyProvider::new(move |_ctx| {
            let calls = calls_in_loader.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(provider_with_reference("guide", "text"))
            }
        });

        assert!(!lazy.is_initialized().await);
        for _ in 0..3 {
            assert_eq!(lazy.get_reference(&ctx(), "guide").await.unwrap(), "text");
        }
        assert!(lazy.is_initialized().await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lazy_factory_failure_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_loader = calls.clone();

        let lazy = LazyProvider::new(move |_ctx| {
            let calls = calls_in_loader.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(SkillError::Transport("cold start".into()))
                } else {
                    Ok(provider_with_reference("guide", "text"))
                }
            }
        });

        assert!(lazy.get_reference(&ctx(), "guide").await.is_err());
        assert!(!lazy.is_initialized().await);

        assert_eq!(lazy.get_reference(&ctx(), "guide").await.unwrap(), "text");
        assert!(lazy.is_initialized().await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_lazy_concurrent_first_access_single_init() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_loader = calls.clone();

        let lazy = Arc::new(LazyProvider::new(move |_ctx| {
            let calls = calls_in_loader.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                Ok(provider_with_reference("guide", "text"))
            }
        }));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let lazy = lazy.clone();
            handles.push(tokio::spawn(async move {
                lazy.get_reference(&SkillContext::new("concurrent"), "guide")
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
