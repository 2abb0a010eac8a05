//! 搜索模块
//!
//! 实现两阶段的歌词查找：`search_lyrics` 返回带不透明 ID 的候选结果，
//! `fetch_lyrics` 根据 ID 重新获取对应的歌词。

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    config::LyricsConfig,
    error::{LyricsHelperError, Result},
    model::{
        identifier::{LyricId, LyricVariant},
        track::{LyricFormat, LyricSearchResult, LyricStream, TrackQuery},
    },
    providers::{Catalog, cancellable},
};

pub mod assembler;
pub mod matcher;

use matcher::MatchStrategy;

/// 根据歌曲元数据，在指定目录中搜索歌词。
///
/// # 参数
/// * `catalog` - 要搜索的歌曲目录。
/// * `track` - 歌曲元数据。
/// * `config` - 本次调用使用的配置快照。
/// * `token` - 取消令牌。
///
/// # 返回
/// 缺少必需字段、目录请求失败或没有可用歌词时返回空列表。
/// 只有在 `token` 被取消时才返回 `Err(LyricsHelperError::Cancelled)`。
pub async fn search_lyrics(
    catalog: &dyn Catalog,
    track: &TrackQuery<'_>,
    config: &LyricsConfig,
    token: &CancellationToken,
) -> Result<Vec<LyricSearchResult>> {
    if token.is_cancelled() {
        return Err(LyricsHelperError::Cancelled);
    }

    let strategy = MatchStrategy::from(config);
    let query = match strategy.build_query(track) {
        Ok(query) => query,
        Err(LyricsHelperError::MissingField(_)) => return Ok(vec![]),
        Err(e) => return Err(e),
    };

    info!(
        "开始对歌曲 '{}' 进行搜索 (提供商: {}, 策略: {:?})",
        query.song,
        catalog.name(),
        strategy
    );

    let candidates = match cancellable(token, catalog.search_songs(&query)).await {
        Ok(candidates) => candidates,
        Err(LyricsHelperError::Cancelled) => return Err(LyricsHelperError::Cancelled),
        Err(e) => {
            debug!(
                "搜索请求失败 (歌曲: {:?}, 艺术家: {:?}, 专辑: {:?}): {}",
                query.song, query.artist, query.album, e
            );
            return Ok(vec![]);
        }
    };

    let total = candidates.len();
    let accepted = strategy.filter_candidates(track, candidates);
    debug!("目录返回 {} 个候选，{} 个通过筛选。", total, accepted.len());

    assembler::assemble_results(catalog, &accepted, token).await
}

/// 根据搜索结果中的 ID 获取歌词。
///
/// `synced` 返回原文（`lrc` 格式），`plain` 返回翻译（`txt` 格式），内容不做任何修改。
///
/// # 返回
/// ID 无效、目录请求失败或所选歌词为空时返回 `Err(LyricsHelperError::LyricNotFound)`；
/// `token` 被取消时返回 `Err(LyricsHelperError::Cancelled)`。
pub async fn fetch_lyrics(
    catalog: &dyn Catalog,
    id: &str,
    token: &CancellationToken,
) -> Result<LyricStream> {
    if token.is_cancelled() {
        return Err(LyricsHelperError::Cancelled);
    }

    let lyric_id = id.parse::<LyricId>().map_err(|e| {
        info!("{}", e);
        LyricsHelperError::LyricNotFound
    })?;

    let raw = match cancellable(token, catalog.get_raw_lyrics(lyric_id.key)).await {
        Ok(raw) => raw,
        Err(LyricsHelperError::Cancelled) => return Err(LyricsHelperError::Cancelled),
        Err(e) => {
            debug!("获取歌曲 ID {} 的歌词失败: {}", lyric_id.key, e);
            return Err(LyricsHelperError::LyricNotFound);
        }
    };

    let (format, content) = match lyric_id.variant {
        LyricVariant::Synced => (LyricFormat::Lrc, raw.original),
        LyricVariant::Plain => (LyricFormat::Txt, raw.translation),
    };

    if content.is_empty() {
        info!("歌曲 ID {} 没有 {} 类型的歌词。", lyric_id.key, lyric_id.variant);
        return Err(LyricsHelperError::LyricNotFound);
    }

    Ok(LyricStream::new(format, content))
}
