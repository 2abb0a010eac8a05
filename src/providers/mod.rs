//! 提供商模块
//!
//! 该模块定义了与外部歌曲目录进行交互的核心抽象。

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{LyricsHelperError, Result},
    model::track::{CatalogCandidate, CatalogQuery, RawLyrics},
};

pub mod netease;

/// 定义了歌曲目录需要实现的通用接口。
///
/// 实现方只负责网络通信和响应反序列化，匹配、过滤和歌词合并都由调用方完成。
#[async_trait]
pub trait Catalog: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"netease"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 根据搜索词搜索歌曲。
    ///
    /// # 参数
    /// * `query` - 歌曲名、可选的艺术家和专辑搜索词，以及结果数量上限。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含目录返回的候选歌曲列表。
    ///
    async fn search_songs(&self, query: &CatalogQuery) -> Result<Vec<CatalogCandidate>>;

    ///
    /// 根据歌曲 ID 获取原始的原文和翻译歌词。
    ///
    /// # 参数
    /// * `key` - 歌曲在目录中的数字 ID。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含原始歌词；两段文本都可能为空。
    ///
    async fn get_raw_lyrics(&self, key: u64) -> Result<RawLyrics>;
}

/// 在取消令牌触发时中止 `future`，并返回 `LyricsHelperError::Cancelled`。
pub(crate) async fn cancellable<T>(
    token: &CancellationToken,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(LyricsHelperError::Cancelled),
        result = future => result,
    }
}
