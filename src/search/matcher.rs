//! 候选歌曲匹配策略
//!
//! 严格策略要求完整的元数据，只用歌曲名搜索，再按时长过滤；
//! 模糊策略把艺术家、专辑作为额外搜索词交给目录，由目录自行缩小范围。

use tracing::info;

use crate::{
    config::LyricsConfig,
    error::{LyricsHelperError, Result},
    model::track::{CatalogCandidate, CatalogQuery, TrackQuery},
};

/// 严格策略允许的时长误差（秒）。
pub const DURATION_TOLERANCE_SECS: f64 = 3.0;

/// 严格策略的搜索结果数量上限。只按歌曲名搜索，需要足够多的候选。
pub const STRICT_SEARCH_LIMIT: u32 = 100;

/// 模糊策略的搜索结果数量上限。
pub const FUZZY_SEARCH_LIMIT: u32 = 30;

/// 由配置选出的匹配策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// 精确匹配：所有字段必需，按时长过滤。
    Strict,
    /// 模糊匹配：由目录根据搜索词排序，不做本地过滤。
    Fuzzy {
        /// 不使用艺术家。
        exclude_artist: bool,
        /// 不使用专辑。
        exclude_album: bool,
    },
}

impl From<&LyricsConfig> for MatchStrategy {
    fn from(config: &LyricsConfig) -> Self {
        if config.strict {
            MatchStrategy::Strict
        } else {
            MatchStrategy::Fuzzy {
                exclude_artist: config.exclude_artist,
                exclude_album: config.exclude_album,
            }
        }
    }
}

/// 返回非空白的字段值。
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// 检查必需字段，缺失的每个字段都会记录一条日志。
///
/// 返回第一个缺失字段对应的错误。
fn require_fields(fields: &[(&'static str, bool)]) -> Result<()> {
    let mut first_missing = None;
    for &(name, is_present) in fields {
        if !is_present {
            info!("缺少必需的字段 '{}'，跳过搜索。", name);
            if first_missing.is_none() {
                first_missing = Some(name);
            }
        }
    }
    match first_missing {
        Some(name) => Err(LyricsHelperError::MissingField(name)),
        None => Ok(()),
    }
}

impl MatchStrategy {
    /// 根据歌曲元数据构建目录搜索请求。
    ///
    /// 必需字段缺失时返回 `LyricsHelperError::MissingField`，此时不应发出任何请求。
    pub fn build_query(&self, track: &TrackQuery<'_>) -> Result<CatalogQuery> {
        let title = present(track.title);
        let artist = present(track.artist);
        let album = present(track.album);

        match *self {
            MatchStrategy::Strict => {
                require_fields(&[
                    ("title", title.is_some()),
                    ("artist", artist.is_some()),
                    ("album", album.is_some()),
                    ("duration", track.duration.is_some()),
                ])?;
                Ok(CatalogQuery {
                    song: title.unwrap_or_default().to_string(),
                    artist: None,
                    album: None,
                    limit: STRICT_SEARCH_LIMIT,
                })
            }
            MatchStrategy::Fuzzy {
                exclude_artist,
                exclude_album,
            } => {
                require_fields(&[
                    ("title", title.is_some()),
                    ("artist", exclude_artist || artist.is_some()),
                    ("album", exclude_album || album.is_some()),
                ])?;
                Ok(CatalogQuery {
                    song: title.unwrap_or_default().to_string(),
                    artist: artist.filter(|_| !exclude_artist).map(str::to_string),
                    album: album.filter(|_| !exclude_album).map(str::to_string),
                    limit: FUZZY_SEARCH_LIMIT,
                })
            }
        }
    }

    /// 决定哪些候选值得获取歌词。
    ///
    /// 严格策略只保留时长与目标相差不超过 3 秒的候选，模糊策略全部保留。
    pub fn filter_candidates(
        &self,
        track: &TrackQuery<'_>,
        candidates: Vec<CatalogCandidate>,
    ) -> Vec<CatalogCandidate> {
        match (self, track.duration) {
            (MatchStrategy::Strict, Some(target)) => {
                let target_secs = target.as_secs_f64();
                candidates
                    .into_iter()
                    .filter(|c| {
                        (c.duration_secs as f64 - target_secs).abs() <= DURATION_TOLERANCE_SECS
                    })
                    .collect()
            }
            _ => candidates,
        }
    }
}
