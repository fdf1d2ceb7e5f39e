//! 远程脚本与传输层
//! Remote script and its transport layer
//!
//! [`RemoteScript`] 与进程内脚本共享同一个 [`Script`] 契约，但把调用
//! 转发给可插拔的 [`ScriptTransport`]。默认提供基于 HTTP 的传输实现
//! 和一个用于测试的内存传输实现。
//! A [`RemoteScript`] shares the [`Script`] contract with in-process
//! scripts but forwards the call to a pluggable [`ScriptTransport`].

use crate::context::SkillContext;
use crate::error::{SkillError, SkillResult};
use crate::resources::script::Script;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// 远程脚本传输接口
/// Remote script transport interface
///
/// 定义了调用远程脚本所需的方法。
#[async_trait]
pub trait ScriptTransport: Send + Sync {
    /// 调用远程脚本
    ///
    /// `script_name`: 脚本名称；`args`: JSON 格式的参数。
    /// 返回 JSON 格式的结果。
    async fn call(&self, ctx: &SkillContext, script_name: &str, args: &str)
    -> SkillResult<String>;
}

/// 远程脚本实现
/// Remote script implementation
///
/// 通过 [`ScriptTransport`] 调用远程服务执行脚本。
pub struct RemoteScript {
    name: String,
    usage: String,
    transport: Option<Arc<dyn ScriptTransport>>,
}

impl RemoteScript {
    /// 创建新的远程脚本
    pub fn new(name: impl Into<String>, transport: Arc<dyn ScriptTransport>) -> Self {
        let name = name.into();
        Self {
            usage: format!("Remote script: {name}"),
            name,
            transport: Some(transport),
        }
    }

    /// 创建未附加传输的远程脚本（调用时返回配置错误）
    pub fn detached(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: format!("Remote script: {name}"),
            name,
            transport: None,
        }
    }

    /// 设置脚本使用说明
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

#[async_trait]
impl Script for RemoteScript {
    async fn run(&self, ctx: &SkillContext, args: &str) -> SkillResult<String> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| SkillError::Config("remote script transport not configured".into()))?;
        transport.call(ctx, &self.name, args).await
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn usage(&self) -> &str {
        &self.usage
    }
}

// ============================================================================
// 调用线格式 (Call wire shape)
// ============================================================================

/// HTTP 脚本调用请求
/// HTTP script call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptCallRequest {
    pub script_name: String,
    pub args: String,
}

/// HTTP 脚本调用响应
/// HTTP script call response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptCallResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

// ============================================================================
// HttpScriptTransport
// ============================================================================

/// 基于 HTTP 的远程脚本传输
/// HTTP-based remote script transport
///
/// 每次调用以 POST `{base_url}/{script_name}` 发出，请求体为
/// [`ScriptCallRequest`]，期望响应体为 [`ScriptCallResponse`]；
/// 响应体不是合法 JSON 时，原始文本被原样作为结果返回
/// （对不符合约定的端点的优雅降级）。非 2xx 状态码是硬失败。
pub struct HttpScriptTransport {
    base_url: String,
    client: reqwest::Client,
    headers: HashMap<String, String>,
    timeout: Duration,
}

impl HttpScriptTransport {
    /// 创建新的 HTTP 传输
    ///
    /// `base_url`: 远程服务的基础 URL，例如 `"http://localhost:8080/api/scripts"`。
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// 设置请求超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 添加自定义请求头
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// 设置自定义 HTTP 客户端
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ScriptTransport for HttpScriptTransport {
    async fn call(
        &self,
        ctx: &SkillContext,
        script_name: &str,
        args: &str,
    ) -> SkillResult<String> {
        if ctx.is_interrupted() {
            return Err(SkillError::Interrupted);
        }

        let url = format!("{}/{}", self.base_url, script_name);
        let body = ScriptCallRequest {
            script_name: script_name.to_string(),
            args: args.to_string(),
        };

        tracing::debug!(script = script_name, url = %url, "calling remote script");

        let mut request = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = tokio::select! {
            _ = ctx.cancellation_token().cancelled() => {
                return Err(SkillError::Interrupted);
            }
            result = request.send() => result.map_err(|e| {
                if e.is_timeout() {
                    SkillError::timeout(self.timeout.as_millis() as u64)
                } else {
                    SkillError::Transport(format!("failed to execute request: {e}"))
                }
            })?,
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SkillError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!(script = script_name, status = %status, "remote script returned error");
            return Err(SkillError::Transport(format!(
                "remote script returned error: status={status}, body={text}"
            )));
        }

        // 尝试解析为 ScriptCallResponse；解析失败则原样返回响应体
        if let Ok(call_resp) = serde_json::from_str::<ScriptCallResponse>(&text) {
            if !call_resp.error.is_empty() {
                return Err(SkillError::ExecutionFailed(call_resp.error));
            }
            if !call_resp.result.is_empty() {
                return Ok(call_resp.result);
            }
        }

        Ok(text)
    }
}

// ============================================================================
// MockScriptTransport
// ============================================================================

/// 脚本处理器类型
type MockHandler =
    Box<dyn Fn(SkillContext, String) -> BoxFuture<'static, SkillResult<String>> + Send + Sync>;

/// 用于测试的内存脚本传输
/// In-memory script transport for tests
///
/// 按脚本名注册处理器，调用未注册的脚本返回
/// [`SkillError::ScriptNotFound`]。
#[derive(Default)]
pub struct MockScriptTransport {
    handlers: HashMap<String, MockHandler>,
}

impl MockScriptTransport {
    /// 创建新的内存传输
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个脚本处理器
    pub fn register<F, Fut>(&mut self, script_name: impl Into<String>, handler: F)
    where
        F: Fn(SkillContext, String) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = SkillResult<String>> + Send + 'static,
    {
        self.handlers.insert(
            script_name.into(),
            Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
        );
    }
}

#[async_trait]
impl ScriptTransport for MockScriptTransport {
    async fn call(
        &self,
        ctx: &SkillContext,
        script_name: &str,
        args: &str,
    ) -> SkillResult<String> {
        let handler = self
            .handlers
            .get(script_name)
            .ok_or_else(|| SkillError::ScriptNotFound(script_name.to_string()))?;
        handler(ctx.clone(), args.to_string()).await
    }
}
