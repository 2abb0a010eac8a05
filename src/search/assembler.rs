//! 搜索结果组装
//!
//! 为每个通过筛选的候选获取原始歌词，解析、合并后打包为 `LyricSearchResult`。

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    converter::{generators::lrc_generator::generate_merged_lrc, parsers::lrc_parser::parse_lrc},
    error::{LyricsHelperError, Result},
    model::{
        identifier::{LyricId, LyricVariant},
        track::{
            CatalogCandidate, LyricFormat, LyricMetadata, LyricSearchResult, LyricStream,
            RawLyrics,
        },
    },
    providers::{Catalog, cancellable},
};

/// 带时间戳的行数少于此值时，认为不是真正的同步歌词。
pub const MIN_TIMED_LINES: usize = 5;

fn build_metadata(candidate: &CatalogCandidate, is_synced: bool) -> LyricMetadata {
    LyricMetadata {
        album: candidate.album.clone(),
        artist: candidate.artists.join(", "),
        title: candidate.title.clone(),
        duration: Duration::from_secs(candidate.duration_secs),
        is_synced,
    }
}

fn build_result(
    provider_name: &str,
    candidate: &CatalogCandidate,
    variant: LyricVariant,
    content: String,
) -> LyricSearchResult {
    let (format, is_synced) = match variant {
        LyricVariant::Synced => (LyricFormat::Lrc, true),
        LyricVariant::Plain => (LyricFormat::Txt, false),
    };
    LyricSearchResult {
        id: LyricId::new(candidate.key, variant).to_string(),
        provider_name: provider_name.to_string(),
        metadata: build_metadata(candidate, is_synced),
        lyrics: LyricStream::new(format, content),
    }
}

/// 将原文与翻译解析、合并为一个同步歌词结果。
///
/// 原文带时间戳的行数不足 [`MIN_TIMED_LINES`] 时返回 `None`。
pub fn assemble_synced(
    provider_name: &str,
    candidate: &CatalogCandidate,
    raw: &RawLyrics,
) -> Option<LyricSearchResult> {
    let original = parse_lrc(&raw.original);
    if original.timed_line_count() < MIN_TIMED_LINES {
        debug!(
            "候选 '{}' (ID: {}) 只有 {} 行带时间戳的歌词，已丢弃。",
            candidate.title,
            candidate.key,
            original.timed_line_count()
        );
        return None;
    }

    let translation = parse_lrc(&raw.translation);
    let merged = generate_merged_lrc(&original, &translation.lines);

    Some(build_result(
        provider_name,
        candidate,
        LyricVariant::Synced,
        merged,
    ))
}

/// 目录在搜索响应中直接附带歌词时使用：不合并，原文和翻译分别作为结果。
///
/// 非空的原文产生一个 `lrc` 格式的同步结果，非空的翻译产生一个 `txt` 格式的纯文本结果。
pub fn assemble_embedded(
    provider_name: &str,
    candidate: &CatalogCandidate,
    raw: &RawLyrics,
) -> Vec<LyricSearchResult> {
    [
        (LyricVariant::Synced, &raw.original),
        (LyricVariant::Plain, &raw.translation),
    ]
    .into_iter()
    .filter(|(_, text)| !text.trim().is_empty())
    .map(|(variant, text)| build_result(provider_name, candidate, variant, text.clone()))
    .collect()
}

/// 依次为每个候选获取歌词并组装结果。
///
/// 单个候选获取失败只会记录日志并跳过；只有取消会作为错误返回。
pub async fn assemble_results(
    catalog: &dyn Catalog,
    candidates: &[CatalogCandidate],
    token: &CancellationToken,
) -> Result<Vec<LyricSearchResult>> {
    let provider_name = catalog.name();
    let mut results = Vec::new();

    for candidate in candidates {
        if let Some(embedded) = &candidate.embedded {
            results.extend(assemble_embedded(provider_name, candidate, embedded));
            continue;
        }

        let raw = match cancellable(token, catalog.get_raw_lyrics(candidate.key)).await {
            Ok(raw) => raw,
            Err(LyricsHelperError::Cancelled) => return Err(LyricsHelperError::Cancelled),
            Err(e) => {
                debug!(
                    "获取歌曲 '{}' (ID: {}) 的歌词失败: {}",
                    candidate.title, candidate.key, e
                );
                continue;
            }
        };

        results.extend(assemble_synced(provider_name, candidate, &raw));
    }

    info!(
        "{} 个候选中有 {} 个产生了歌词结果。",
        candidates.len(),
        results.len()
    );
    Ok(results)
}
