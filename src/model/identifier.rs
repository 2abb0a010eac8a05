//! 歌词 ID 的编码与解码。
//!
//! 搜索结果携带的 ID 形如 `481357_synced`：目录中的歌曲 ID、分隔符和歌词类型。
//! 库内部始终使用结构化的 [`LyricId`]，只在对外接口处才转换为字符串。

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::error::LyricsHelperError;

/// 歌曲 ID 与歌词类型之间的分隔符。
pub const ID_SEPARATOR: char = '_';

/// 一个 ID 指向的歌词类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LyricVariant {
    /// 原文的同步歌词。
    Synced,
    /// 翻译歌词，以纯文本形式提供。
    Plain,
}

/// 结构化的歌词 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LyricId {
    /// 歌曲在目录中的数字 ID。
    pub key: u64,
    /// 歌词类型。
    pub variant: LyricVariant,
}

impl LyricId {
    /// 创建一个歌词 ID。
    pub fn new(key: u64, variant: LyricVariant) -> Self {
        Self { key, variant }
    }
}

impl fmt::Display for LyricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, ID_SEPARATOR, self.variant)
    }
}

impl FromStr for LyricId {
    type Err = LyricsHelperError;

    /// 只在第一个分隔符处切分，歌曲 ID 部分不会被再次切分。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LyricsHelperError::InvalidIdentifier(s.to_string());

        let (key, variant) = s.split_once(ID_SEPARATOR).ok_or_else(invalid)?;
        let key = key.parse::<u64>().map_err(|_| invalid())?;
        let variant = LyricVariant::from_str(variant).map_err(|_| invalid())?;

        Ok(Self { key, variant })
    }
}
