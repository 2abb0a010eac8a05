#![warn(missing_docs)]

//! # NetEase Lyrics Helper
//!
//! 根据歌曲元数据从网易云音乐查找同步歌词，并把原文和翻译合并为一份 LRC。
//!
//! 查找分为两个阶段：
//!
//! - **搜索**: `LyricsHelper::search` 根据标题、艺术家、专辑和时长搜索候选歌曲，
//!   为每个可用的候选返回合并后的歌词和一个不透明的 ID。
//! - **获取**: `LyricsHelper::fetch` 只凭 ID 就能重新取回对应的原文或翻译。
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use netease_lyrics_helper::{LyricsConfig, LyricsHelper, TrackQuery};
//! use tokio_util::sync::CancellationToken;
//!
//! async {
//!     let helper = LyricsHelper::new();
//!     let token = CancellationToken::new();
//!
//!     let track = TrackQuery {
//!         title: Some("Halo"),
//!         artist: Some("Beyoncé"),
//!         album: Some("I Am... Sasha Fierce"),
//!         duration: Some(Duration::from_secs(261)),
//!     };
//!     let results = helper
//!         .search(&track, &LyricsConfig::default(), &token)
//!         .await
//!         .unwrap();
//!
//!     if let Some(first) = results.first() {
//!         match helper.fetch(&first.id, &token).await {
//!             Ok(stream) => println!("{}", stream.content),
//!             Err(e) => eprintln!("获取失败: {}", e),
//!         }
//!     }
//! };
//! ```
pub mod config;
pub mod converter;
pub mod error;
pub mod model;
pub mod providers;
pub mod search;

use tokio_util::sync::CancellationToken;

pub use crate::{
    config::LyricsConfig,
    error::{LyricsHelperError, Result},
    model::track::{LyricFormat, LyricSearchResult, LyricStream, TrackQuery},
};

use crate::providers::{Catalog, netease::NeteaseClient};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层歌词助手客户端，为宿主程序提供搜索与获取两个入口。
///
/// 默认使用网易云音乐作为歌曲目录，也可以通过 [`LyricsHelper::with_catalog`]
/// 注入其它实现了 [`Catalog`] 的目录。实例本身不保存任何可变状态，可以被并发使用。
pub struct LyricsHelper<C: Catalog = NeteaseClient> {
    catalog: C,
}

impl Default for LyricsHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsHelper {
    /// 创建一个使用网易云音乐的 `LyricsHelper` 实例。
    pub fn new() -> Self {
        Self::with_catalog(NeteaseClient::new())
    }
}

impl<C: Catalog> LyricsHelper<C> {
    /// 使用指定的歌曲目录创建实例。
    pub fn with_catalog(catalog: C) -> Self {
        Self { catalog }
    }

    /// 返回内部使用的歌曲目录。
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 返回歌曲目录的提供商名称。
    pub fn provider_name(&self) -> &'static str {
        self.catalog.name()
    }

    /// 搜索歌词。
    ///
    /// # 参数
    /// * `track` - 歌曲元数据。
    /// * `config` - 本次调用使用的配置。
    /// * `token` - 取消令牌。
    ///
    /// # 返回
    /// 普通的无匹配、缺少字段或网络失败都返回空列表；
    /// 只有取消会返回 `Err(LyricsHelperError::Cancelled)`。
    pub async fn search(
        &self,
        track: &TrackQuery<'_>,
        config: &LyricsConfig,
        token: &CancellationToken,
    ) -> Result<Vec<LyricSearchResult>> {
        search::search_lyrics(&self.catalog, track, config, token).await
    }

    /// 根据搜索结果的 ID 获取歌词。
    ///
    /// # 返回
    /// 找不到歌词时返回 `Err(LyricsHelperError::LyricNotFound)`，
    /// 被取消时返回 `Err(LyricsHelperError::Cancelled)`。
    pub async fn fetch(&self, id: &str, token: &CancellationToken) -> Result<LyricStream> {
        search::fetch_lyrics(&self.catalog, id, token).await
    }
}
