//! Body 标记解析
//! Body markup parsing
//!
//! 从 Skill 的 Body 文本中解析 `<script>`、`<reference>`、`<asset>` 标记，
//! 并提供构建 Body 内容的嵌入辅助函数。
//! Parses `<script>`, `<reference>` and `<asset>` tags out of a skill body
//! and provides embed helpers for constructing body content.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// 标记类别
/// Tag kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// 可执行脚本引用
    Script,
    /// 参考文档引用
    Reference,
    /// 资源文件引用
    Asset,
}

impl TagKind {
    /// 标记名字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Script => "script",
            TagKind::Reference => "reference",
            TagKind::Asset => "asset",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析出的标记
/// A parsed markup tag
///
/// 内容为开闭标记之间的文本，两端空白已去除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupTag {
    /// 标记类别：script, reference, asset
    pub kind: TagKind,
    /// 标记内容（如 "init_skill", "usage_guide"）
    pub content: String,
}

// 开闭标记类别必须一致，畸形标记直接不匹配
fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(
            r"<script>([^<]+)</script>|<reference>([^<]+)</reference>|<asset>([^<]+)</asset>",
        )
        .expect("markup tag pattern is valid")
    })
}

/// 从文本中解析所有标记，按出现顺序返回
/// Parse all tags out of a body, in occurrence order
///
/// 解析是尽力而为的：未闭合或类别不匹配的标记不产生结果，也不报错。
/// 空 Body 返回空序列。
pub fn parse_tags(body: &str) -> Vec<MarkupTag> {
    if body.is_empty() {
        return Vec::new();
    }

    tag_regex()
        .captures_iter(body)
        .filter_map(|caps| {
            let (kind, content) = if let Some(m) = caps.get(1) {
                (TagKind::Script, m)
            } else if let Some(m) = caps.get(2) {
                (TagKind::Reference, m)
            } else {
                (TagKind::Asset, caps.get(3)?)
            };
            let content = content.as_str().trim();
            if content.is_empty() {
                return None;
            }
            Some(MarkupTag {
                kind,
                content: content.to_string(),
            })
        })
        .collect()
}

/// 按类别过滤标记内容
/// Filter tag contents by kind
///
/// 没有该类别的标记时返回 `None`，调用方把 "没有条目" 和 "不存在" 视为等价。
pub fn extract_names(body: &str, kind: TagKind) -> Option<Vec<String>> {
    let names: Vec<String> = parse_tags(body)
        .into_iter()
        .filter(|tag| tag.kind == kind)
        .map(|tag| tag.content)
        .collect();

    if names.is_empty() { None } else { Some(names) }
}

/// 提取 Body 中引用的所有脚本名称
pub fn extract_script_names(body: &str) -> Option<Vec<String>> {
    extract_names(body, TagKind::Script)
}

/// 提取 Body 中引用的所有参考文档名称
pub fn extract_reference_names(body: &str) -> Option<Vec<String>> {
    extract_names(body, TagKind::Reference)
}

/// 提取 Body 中引用的所有资源文件名称
pub fn extract_asset_names(body: &str) -> Option<Vec<String>> {
    extract_names(body, TagKind::Asset)
}

/// 检查 Body 中是否包含标记
pub fn has_tags(body: &str) -> bool {
    !parse_tags(body).is_empty()
}

// ============================================================================
// 嵌入辅助函数 (Embed helpers)
// ============================================================================

/// 生成 `<script>name</script>` 格式字符串
pub fn embed_script(name: &str) -> String {
    format!("<script>{name}</script>")
}

/// 生成 `<reference>name</reference>` 格式字符串
pub fn embed_reference(name: &str) -> String {
    format!("<reference>{name}</reference>")
}

/// 生成 `<asset>name</asset>` 格式字符串
pub fn embed_asset(name: &str) -> String {
    format!("<asset>{name}</asset>")
}
