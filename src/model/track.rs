//! 定义了与歌词搜索功能相关的核心数据结构，包括搜索输入、候选歌曲和搜索结果。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// 代表一次搜索的歌曲元数据，用作搜索函数的输入参数。
///
/// 所有字段都可能缺失，由匹配策略决定哪些字段是必需的。
#[derive(Default, Debug, Clone, Copy)]
pub struct TrackQuery<'a> {
    /// 歌曲标题。
    pub title: Option<&'a str>,
    /// 艺术家名。
    pub artist: Option<&'a str>,
    /// 专辑名。
    pub album: Option<&'a str>,
    /// 歌曲时长。
    pub duration: Option<Duration>,
}

/// 发往歌曲目录的搜索请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// 歌曲名搜索词。
    pub song: String,
    /// 可选的艺术家搜索词。
    pub artist: Option<String>,
    /// 可选的专辑搜索词。
    pub album: Option<String>,
    /// 最多返回的候选数量。
    pub limit: u32,
}

impl CatalogQuery {
    /// 按顺序返回所有非空的搜索词。
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.song.as_str())
            .chain(self.artist.as_deref())
            .chain(self.album.as_deref())
    }
}

/// 从歌曲目录获取的、未经解析的原始歌词内容。
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RawLyrics {
    /// 原文歌词文本，可能为空。
    pub original: String,
    /// 翻译歌词文本，可能为空。
    pub translation: String,
}

/// 歌曲目录返回的一条候选歌曲。
#[derive(Debug, Clone, Default)]
pub struct CatalogCandidate {
    /// 歌曲在目录中的数字 ID。
    pub key: u64,
    /// 歌曲标题。
    pub title: String,
    /// 专辑名。
    pub album: String,
    /// 艺术家列表，保持目录返回的顺序。
    pub artists: Vec<String>,
    /// 歌曲时长（整秒）。
    pub duration_secs: u64,
    /// 目录在搜索响应中直接附带的歌词。大多数目录不会填写。
    pub embedded: Option<RawLyrics>,
}

/// 歌词流的格式标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LyricFormat {
    /// 带时间戳的 LRC 文本。
    Lrc,
    /// 不带时间戳的纯文本。
    Txt,
}

/// 一段带格式标签的歌词文本，交给宿主程序消费。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricStream {
    /// 文本格式。
    pub format: LyricFormat,
    /// 歌词内容。
    pub content: String,
}

impl LyricStream {
    /// 创建一个歌词流。
    pub fn new(format: LyricFormat, content: impl Into<String>) -> Self {
        Self {
            format,
            content: content.into(),
        }
    }
}

/// 搜索结果的描述性元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricMetadata {
    /// 专辑名。
    pub album: String,
    /// 以 `", "` 连接的艺术家名。
    pub artist: String,
    /// 歌曲标题。
    pub title: String,
    /// 歌曲时长。
    pub duration: Duration,
    /// 歌词是否带时间戳。
    pub is_synced: bool,
}

/// 代表一个标准化的歌词搜索结果条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricSearchResult {
    /// 不透明的歌词 ID，稍后可直接交给 `fetch` 使用。
    pub id: String,
    /// 提供商的名称 (例如 "netease")。
    pub provider_name: String,
    /// 描述性元数据。
    pub metadata: LyricMetadata,
    /// 歌词内容。
    pub lyrics: LyricStream,
}
