//! 资源文件
//! Asset resource

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 资源文件类别，取值限定在封闭的媒体扩展名集合内
/// Asset kind, drawn from a closed set of media extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AssetKind {
    // 图片格式
    Png,
    Jpeg,
    Gif,
    Svg,
    // 字体格式
    Ttf,
    Otf,
    Woff2,
    // 文档格式
    Pdf,
    Docx,
    Pptx,
}

impl AssetKind {
    /// 扩展名字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Png => "png",
            AssetKind::Jpeg => "jpeg",
            AssetKind::Gif => "gif",
            AssetKind::Svg => "svg",
            AssetKind::Ttf => "ttf",
            AssetKind::Otf => "otf",
            AssetKind::Woff2 => "woff2",
            AssetKind::Pdf => "pdf",
            AssetKind::Docx => "docx",
            AssetKind::Pptx => "pptx",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(AssetKind::Png),
            "jpeg" | "jpg" => Ok(AssetKind::Jpeg),
            "gif" => Ok(AssetKind::Gif),
            "svg" => Ok(AssetKind::Svg),
            "ttf" => Ok(AssetKind::Ttf),
            "otf" => Ok(AssetKind::Otf),
            "woff2" => Ok(AssetKind::Woff2),
            "pdf" => Ok(AssetKind::Pdf),
            "docx" => Ok(AssetKind::Docx),
            "pptx" => Ok(AssetKind::Pptx),
            other => Err(format!("unknown asset kind: {other}")),
        }
    }
}

/// 资源文件：命名的不可变字节负载，带媒体类别标签
/// A named immutable byte payload with a media-type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub bytes: Vec<u8>,
    pub kind: AssetKind,
}

impl Asset {
    /// 创建新的资源文件
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            bytes,
            kind,
        }
    }

    /// 字节长度
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 负载是否为空
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
