use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netease_lyrics_helper::{
    LyricFormat, LyricsConfig, LyricsHelper, LyricsHelperError, Result, TrackQuery,
    model::track::{CatalogCandidate, CatalogQuery, RawLyrics},
    providers::Catalog,
};
use tokio_util::sync::CancellationToken;

/// 内存中的歌曲目录，记录收到的请求。
#[derive(Default)]
struct MockCatalog {
    candidates: Vec<CatalogCandidate>,
    lyrics: HashMap<u64, RawLyrics>,
    fail_search: bool,
    failing_keys: Vec<u64>,
    search_calls: AtomicUsize,
    lyric_calls: AtomicUsize,
    last_query: Mutex<Option<CatalogQuery>>,
}

#[async_trait]
impl Catalog for MockCatalog {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search_songs(&self, query: &CatalogQuery) -> Result<Vec<CatalogCandidate>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.fail_search {
            return Err(LyricsHelperError::ApiError("search".to_string()));
        }
        Ok(self.candidates.clone())
    }

    async fn get_raw_lyrics(&self, key: u64) -> Result<RawLyrics> {
        self.lyric_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_keys.contains(&key) {
            return Err(LyricsHelperError::ApiError("lyric".to_string()));
        }
        Ok(self.lyrics.get(&key).cloned().unwrap_or_default())
    }
}

/// 永远不会返回的目录，用于测试取消。
struct HangingCatalog;

#[async_trait]
impl Catalog for HangingCatalog {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn search_songs(&self, _query: &CatalogQuery) -> Result<Vec<CatalogCandidate>> {
        std::future::pending().await
    }

    async fn get_raw_lyrics(&self, _key: u64) -> Result<RawLyrics> {
        std::future::pending().await
    }
}

const HALO_LRC: &str = "[ti:Halo]
[00:01.00]Remember those walls I built
[00:05.50]Well, baby, they're tumbling down
[00:09:20]And they didn't even put up a fight
[00:13]They didn't even make a sound
[00:17.123]I found a way to let you in
";

const HALO_TRANSLATION: &str = "[00:01.00]还记得我筑起的那些高墙吗
[00:05.50]
[00:13.00]它们甚至没有发出一点声音
";

fn halo_track() -> TrackQuery<'static> {
    TrackQuery {
        title: Some("Halo"),
        artist: Some("Beyoncé"),
        album: Some("I Am... Sasha Fierce"),
        duration: Some(Duration::from_secs(215)),
    }
}

fn candidate(key: u64, duration_secs: u64) -> CatalogCandidate {
    CatalogCandidate {
        key,
        title: "Halo".to_string(),
        album: "I Am... Sasha Fierce".to_string(),
        artists: vec!["Beyoncé".to_string()],
        duration_secs,
        embedded: None,
    }
}

fn halo_lyrics() -> RawLyrics {
    RawLyrics {
        original: HALO_LRC.to_string(),
        translation: HALO_TRANSLATION.to_string(),
    }
}

fn fuzzy(exclude_artist: bool, exclude_album: bool) -> LyricsConfig {
    LyricsConfig {
        strict: false,
        exclude_artist,
        exclude_album,
    }
}

#[test_log::test(tokio::test)]
async fn test_strict_search_filters_by_duration() {
    let catalog = MockCatalog {
        candidates: vec![candidate(1, 217), candidate(2, 220)],
        lyrics: HashMap::from([(1, halo_lyrics()), (2, halo_lyrics())]),
        ..Default::default()
    };
    let helper = LyricsHelper::with_catalog(catalog);
    let token = CancellationToken::new();

    let results = helper
        .search(&halo_track(), &LyricsConfig::default(), &token)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1_synced");
    assert_eq!(results[0].provider_name, "mock");
    assert_eq!(results[0].lyrics.format, LyricFormat::Lrc);

    insta::assert_snapshot!(results[0].lyrics.content, @r"
    [ti:Halo]
    [00:01.000]Remember those walls I built
    [00:01.000]还记得我筑起的那些高墙吗
    [00:05.500]Well, baby, they're tumbling down
    [00:09.200]And they didn't even put up a fight
    [00:13.000]They didn't even make a sound
    [00:13.000]它们甚至没有发出一点声音
    [00:17.123]I found a way to let you in
    ");
}

#[test_log::test(tokio::test)]
async fn test_strict_search_queries_title_only() {
    let catalog = MockCatalog::default();
    let helper = LyricsHelper::with_catalog(catalog);

    let results = helper
        .search(&halo_track(), &LyricsConfig::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(results.is_empty());

    let query = helper_query(&helper);
    assert_eq!(query.song, "Halo");
    assert!(query.artist.is_none());
    assert!(query.album.is_none());
}

fn helper_query(helper: &LyricsHelper<MockCatalog>) -> CatalogQuery {
    helper
        .catalog()
        .last_query
        .lock()
        .unwrap()
        .clone()
        .expect("应已发出搜索请求")
}

#[test_log::test(tokio::test)]
async fn test_strict_missing_duration_issues_no_request() {
    let catalog = MockCatalog {
        candidates: vec![candidate(1, 215)],
        ..Default::default()
    };
    let helper = LyricsHelper::with_catalog(catalog);
    let track = TrackQuery {
        duration: None,
        ..halo_track()
    };

    let results = helper
        .search(&track, &LyricsConfig::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(helper.catalog().search_calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn test_fuzzy_excluded_album_not_required() {
    let catalog = MockCatalog {
        candidates: vec![candidate(7, 400)],
        lyrics: HashMap::from([(7, halo_lyrics())]),
        ..Default::default()
    };
    let helper = LyricsHelper::with_catalog(catalog);
    let track = TrackQuery {
        album: None,
        duration: None,
        ..halo_track()
    };

    let results = helper
        .search(&track, &fuzzy(false, true), &CancellationToken::new())
        .await
        .unwrap();

    // 模糊策略不按时长过滤
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "7_synced");

    let query = helper_query(&helper);
    assert_eq!(query.artist.as_deref(), Some("Beyoncé"));
    assert!(query.album.is_none());
}

#[test_log::test(tokio::test)]
async fn test_fuzzy_missing_artist_issues_no_request() {
    let helper = LyricsHelper::with_catalog(MockCatalog::default());
    let track = TrackQuery {
        artist: None,
        album: None,
        ..halo_track()
    };

    let results = helper
        .search(&track, &fuzzy(false, true), &CancellationToken::new())
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(helper.catalog().search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(helper.catalog().lyric_calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn test_transport_failures_become_empty_results() {
    let helper = LyricsHelper::with_catalog(MockCatalog {
        candidates: vec![candidate(1, 215)],
        fail_search: true,
        ..Default::default()
    });
    let results = helper
        .search(&halo_track(), &LyricsConfig::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(results.is_empty());

    let helper = LyricsHelper::with_catalog(MockCatalog {
        candidates: vec![candidate(1, 215), candidate(2, 215)],
        lyrics: HashMap::from([(2, halo_lyrics())]),
        failing_keys: vec![1],
        ..Default::default()
    });
    let results = helper
        .search(&halo_track(), &LyricsConfig::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "2_synced");
}

#[test_log::test(tokio::test)]
async fn test_short_lyrics_are_dropped_consistently() {
    let short = RawLyrics {
        original: "[00:01.00]a\n[00:02.00]b\n[00:03.00]c\n[00:04.00]d\n".to_string(),
        translation: String::new(),
    };
    let helper = LyricsHelper::with_catalog(MockCatalog {
        candidates: vec![candidate(1, 215), candidate(2, 215)],
        lyrics: HashMap::from([(1, short), (2, halo_lyrics())]),
        ..Default::default()
    });
    let token = CancellationToken::new();

    let first = helper
        .search(&halo_track(), &LyricsConfig::default(), &token)
        .await
        .unwrap();
    let second = helper
        .search(&halo_track(), &LyricsConfig::default(), &token)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["2_synced"]
    );
}

#[test_log::test(tokio::test)]
async fn test_embedded_lyrics_skip_fetch() {
    let mut embedded = candidate(9, 215);
    embedded.embedded = Some(RawLyrics {
        original: "[00:01.00]a".to_string(),
        translation: "甲".to_string(),
    });
    let helper = LyricsHelper::with_catalog(MockCatalog {
        candidates: vec![embedded],
        ..Default::default()
    });

    let results = helper
        .search(&halo_track(), &LyricsConfig::default(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        results.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["9_synced", "9_plain"]
    );
    assert_eq!(results[1].lyrics.format, LyricFormat::Txt);
    assert_eq!(helper.catalog().lyric_calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn test_fetch_synced_with_empty_original_is_not_found() {
    let helper = LyricsHelper::with_catalog(MockCatalog {
        lyrics: HashMap::from([(
            481357,
            RawLyrics {
                original: String::new(),
                translation: "翻译".to_string(),
            },
        )]),
        ..Default::default()
    });

    let err = helper
        .fetch("481357_synced", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, LyricsHelperError::LyricNotFound));
}

#[test_log::test(tokio::test)]
async fn test_fetch_plain_returns_translation_unmodified() {
    let translation = "[00:01.00]还记得\n第二行  \n";
    let helper = LyricsHelper::with_catalog(MockCatalog {
        lyrics: HashMap::from([(
            481357,
            RawLyrics {
                original: HALO_LRC.to_string(),
                translation: translation.to_string(),
            },
        )]),
        ..Default::default()
    });

    let stream = helper
        .fetch("481357_plain", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stream.format, LyricFormat::Txt);
    assert_eq!(stream.content, translation);

    let stream = helper
        .fetch("481357_synced", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stream.format, LyricFormat::Lrc);
    assert_eq!(stream.content, HALO_LRC);
}

#[test_log::test(tokio::test)]
async fn test_fetch_malformed_or_failing_ids_are_not_found() {
    let helper = LyricsHelper::with_catalog(MockCatalog {
        lyrics: HashMap::from([(1, halo_lyrics())]),
        failing_keys: vec![2],
        ..Default::default()
    });
    let token = CancellationToken::new();

    for id in ["1", "1_lrc", "x_synced", "2_synced"] {
        let err = helper.fetch(id, &token).await.unwrap_err();
        assert!(
            matches!(err, LyricsHelperError::LyricNotFound),
            "'{id}' 应返回 LyricNotFound，实际为 {err:?}"
        );
    }
    // 只有 2_synced 发出了请求
    assert_eq!(helper.catalog().lyric_calls.load(Ordering::SeqCst), 1);
}

#[test_log::test(tokio::test)]
async fn test_cancellation_aborts_search_and_fetch() {
    let helper = LyricsHelper::with_catalog(HangingCatalog);
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = helper
        .search(&halo_track(), &LyricsConfig::default(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, LyricsHelperError::Cancelled));

    let err = helper.fetch("1_synced", &token).await.unwrap_err();
    assert!(matches!(err, LyricsHelperError::Cancelled));
}

#[test_log::test(tokio::test)]
async fn test_pre_cancelled_token_issues_no_request() {
    let helper = LyricsHelper::with_catalog(MockCatalog {
        candidates: vec![candidate(1, 215)],
        lyrics: HashMap::from([(1, halo_lyrics())]),
        ..Default::default()
    });
    let token = CancellationToken::new();
    token.cancel();

    let err = helper
        .search(&halo_track(), &LyricsConfig::default(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, LyricsHelperError::Cancelled));
    assert_eq!(helper.catalog().search_calls.load(Ordering::SeqCst), 0);
}
