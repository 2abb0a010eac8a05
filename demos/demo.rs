//! 用于演示 `netease-lyrics-helper` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --example demo
//! ```

use std::time::Duration;

use netease_lyrics_helper::{LyricsConfig, LyricsHelper, TrackQuery, config, error::Result};
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = config::load_config().unwrap_or_else(|e| {
        warn!("读取配置失败，使用默认配置: {}", e);
        LyricsConfig::default()
    });
    info!("使用配置: {:?}", config);

    let helper = LyricsHelper::new();
    let token = CancellationToken::new();

    // 这里硬编码了一首歌作为示例。在实际应用中，这些信息来自媒体库的元数据。
    let track = TrackQuery {
        title: Some("有点甜"),
        artist: Some("汪苏泷"),
        album: Some("万有引力"),
        duration: Some(Duration::from_secs(235)),
    };

    let results = helper.search(&track, &config, &token).await?;
    if results.is_empty() {
        error!("未找到可用的歌词，程序退出。");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        info!(
            "[{}] {} - {} ({}，{} 秒) ID: {}",
            i + 1,
            result.metadata.title,
            result.metadata.artist,
            result.metadata.album,
            result.metadata.duration.as_secs(),
            result.id
        );
    }

    let first = &results[0];
    info!("合并后的歌词:\n{}", first.lyrics.content);

    match helper.fetch(&first.id, &token).await {
        Ok(stream) => info!(
            "通过 ID 重新获取成功，格式: {}，共 {} 行。",
            stream.format,
            stream.content.lines().count()
        ),
        Err(e) => error!("通过 ID 获取歌词失败: {}", e),
    }

    Ok(())
}
