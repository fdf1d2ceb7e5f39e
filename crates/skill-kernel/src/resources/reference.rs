//! 参考文档资源
//! Reference resource

use serde::{Deserialize, Serialize};
use std::fmt;

/// 参考文档：一段命名的静态文本，作为上下文知识提供给调用方
/// A named block of static text serving as contextual knowledge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub body: String,
}

impl Reference {
    /// 创建新的参考文档
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// 返回简短摘要（正文前 100 个字符），由正文派生而非存储
    /// Brief summary (first 100 chars), derived from the body, not stored
    pub fn summary(&self) -> String {
        if self.body.chars().count() > 100 {
            let head: String = self.body.chars().take(100).collect();
            format!("{head}...")
        } else {
            self.body.clone()
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}
