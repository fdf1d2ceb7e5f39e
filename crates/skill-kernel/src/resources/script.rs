//! 脚本资源与泛型调用引擎
//! Script resource and the generic invocation engine
//!
//! 强类型脚本通过统一的字符串进/字符串出契约暴露给调用方：
//! 这里是强类型与无类型调用边界相遇的唯一位置。
//! Strongly-typed scripts are exposed through a uniform string-in/string-out
//! contract; this is the single boundary where strong typing meets the
//! untyped call surface.

use crate::context::SkillContext;
use crate::error::{SkillError, SkillResult};
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use std::any::type_name;
use std::future::Future;
use std::sync::{Arc, OnceLock};

/// 统一脚本 Trait
/// Unified Script Trait
///
/// 调用方只接触 JSON 字符串；具体实现（进程内泛型包装、远程转发）
/// 决定如何解码、执行和编码。
///
/// # 示例
/// # Example
///
/// ```rust,ignore
/// use skill_kernel::resources::{FnScript, Script};
///
/// let script = FnScript::new("greet", |_ctx, name: String| async move {
///     Ok(format!("hello, {name}"))
/// });
///
/// let result = script.run(&ctx, "\"world\"").await?;
/// assert_eq!(result, "\"hello, world\"");
/// ```
#[async_trait]
pub trait Script: Send + Sync {
    /// 执行脚本：接收 JSON 编码的参数，返回 JSON 编码的结果
    /// Run the script: JSON-encoded args in, JSON-encoded result out
    async fn run(&self, ctx: &SkillContext, args: &str) -> SkillResult<String>;

    /// 脚本名称 (唯一标识符)
    /// Script name (unique identifier)
    fn name(&self) -> &str;

    /// 脚本使用说明
    /// Script usage description
    fn usage(&self) -> &str;
}

impl std::fmt::Debug for dyn Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("name", &self.name())
            .finish()
    }
}

/// 脚本函数类型：一个固定输入/输出类型的异步函数
/// Script function type: an async function with fixed input/output types
pub type ScriptFunc<I, O> =
    Arc<dyn Fn(SkillContext, I) -> BoxFuture<'static, SkillResult<O>> + Send + Sync>;

/// 泛型脚本包装
/// Generic script wrapper
///
/// 把 `Fn(ctx, I) -> O` 包装进 [`Script`] 契约：
/// 解码失败 → [`SkillError::Decode`]，编码失败 → [`SkillError::Encode`]，
/// 函数自身的错误原样向上传播，调用方据此区分应用错误与编解码错误。
///
/// 输入类型的 "零值构造" 由 serde 完成：映射、序列、多级 Box 链
/// 都由反序列化器直接构造，无需额外的实例化步骤。
pub struct FnScript<I, O> {
    name: String,
    usage: Option<String>,
    derived_usage: OnceLock<String>,
    func: ScriptFunc<I, O>,
}

impl<I, O> FnScript<I, O>
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
{
    /// 创建新的泛型脚本
    /// Create a new generic script
    pub fn new<F, Fut>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(SkillContext, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SkillResult<O>> + Send + 'static,
    {
        Self {
            name: name.into(),
            usage: None,
            derived_usage: OnceLock::new(),
            func: Arc::new(move |ctx, input| Box::pin(func(ctx, input))),
        }
    }

    /// 设置使用说明
    /// Set the usage description
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// 转换为共享的动态脚本对象
    /// Convert into a shared dynamic script object
    pub fn into_dyn(self) -> Arc<dyn Script>
    where
        I: Sync,
        O: Sync,
    {
        Arc::new(self)
    }
}

#[async_trait]
impl<I, O> Script for FnScript<I, O>
where
    I: DeserializeOwned + Send + Sync + 'static,
    O: Serialize + Send + Sync + 'static,
{
    async fn run(&self, ctx: &SkillContext, args: &str) -> SkillResult<String> {
        let input: I =
            serde_json::from_str(args).map_err(|e| SkillError::decode(&self.name, e))?;

        let output = (self.func)(ctx.clone(), input).await?;

        serde_json::to_string(&output).map_err(|e| SkillError::encode(&self.name, e))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn usage(&self) -> &str {
        // 显式设置的说明优先，否则从输入输出类型名派生一次并缓存
        if let Some(usage) = &self.usage {
            return usage;
        }
        self.derived_usage.get_or_init(|| {
            format!(
                "Input: {}, Output: {}",
                type_name::<I>(),
                type_name::<O>()
            )
        })
    }
}
