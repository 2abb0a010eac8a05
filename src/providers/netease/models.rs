//! 此模块定义了用于反序列化网易云音乐 API 响应的 `struct` 数据结构。
//! API 来源于 <https://github.com/NeteaseCloudMusicApiReborn/api>

use serde::Deserialize;

// =================================================================
// 搜索接口 (`/eapi/cloudsearch/pc`) 的模型
// =================================================================

/// 搜索 API 的顶层响应结构。
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// API 返回码，通常 `200` 表示成功。
    pub code: i32,
    /// 包含搜索结果的容器。没有结果时可能整个缺失。
    pub result: Option<SearchResultData>,
}

/// 搜索结果的数据部分。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultData {
    /// 匹配到的歌曲对象列表。
    #[serde(default)]
    pub songs: Vec<Song>,
    /// 匹配到的歌曲总数。
    #[serde(default)]
    pub song_count: u32,
}

// =================================================================
// 歌词接口 (`/eapi/song/lyric/v1`) 的模型
// =================================================================

/// 歌词接口的顶层响应结构。
#[derive(Debug, Deserialize)]
pub struct LyricResult {
    /// API 返回码，`200` 表示成功。
    pub code: i32,
    /// 标准 LRC 歌词。
    pub lrc: Option<LyricData>,
    /// 翻译 LRC 歌词。
    pub tlyric: Option<LyricData>,
}

/// 单一歌词内容的数据结构。
#[derive(Debug, Deserialize)]
pub struct LyricData {
    /// 歌词文本内容。
    #[serde(default)]
    pub lyric: String,
}

// =================================================================
// 通用的歌曲/艺术家/专辑模型
// =================================================================

/// 代表一首歌曲的详细信息。
#[derive(Debug, Deserialize)]
pub struct Song {
    /// 歌曲的数字 ID。
    pub id: u64,
    /// 歌曲名。
    pub name: String,
    /// 演唱者列表。
    #[serde(rename = "ar", default)]
    pub artist_info: Vec<Artist>,
    /// 所属专辑信息。
    #[serde(rename = "al")]
    pub album_info: Album,
    /// 歌曲时长，单位为毫秒 (ms)。
    #[serde(rename = "dt", default)]
    pub duration: u64,
}

/// 代表一位艺术家的简要信息。
#[derive(Debug, Deserialize)]
pub struct Artist {
    /// 艺术家的数字 ID。
    pub id: u64,
    /// 艺术家姓名。可能为 `null`。
    pub name: Option<String>,
}

/// 代表一张专辑的简要信息。
#[derive(Debug, Deserialize)]
pub struct Album {
    /// 专辑的数字 ID。
    pub id: u64,
    /// 专辑名。可能为 `null`。
    pub name: Option<String>,
}
