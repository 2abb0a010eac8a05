//! 定义了整个 `netease-lyrics-helper` 库的错误类型 `LyricsHelperError`。

use thiserror::Error;

/// `netease-lyrics-helper` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum LyricsHelperError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 加密失败
    #[error("加密失败: {0}")]
    Encryption(String),

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),

    /// 搜索所需的歌曲元数据字段缺失
    #[error("缺少必需的字段: {0}")]
    MissingField(&'static str),

    /// 无法解析的歌词 ID
    #[error("无效的歌词 ID: '{0}'")]
    InvalidIdentifier(String),

    /// 在数据源中找不到歌词内容
    #[error("在源中未找到歌词内容")]
    LyricNotFound,

    /// 调用方取消了本次请求
    #[error("请求已被取消")]
    Cancelled,
}

/// `LyricsHelperError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, LyricsHelperError>;
