//! 此模块实现了与网易云音乐平台进行交互的 `Catalog`。
//! API 来源于 https://github.com/NeteaseCloudMusicApiReborn/api

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, REFERER, USER_AGENT},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    error::{LyricsHelperError, Result},
    model::track::{CatalogCandidate, CatalogQuery, RawLyrics},
    providers::Catalog,
};

mod crypto;
pub mod models;

const BASE_URL_NETEASE: &str = "https://music.163.com";
const SEARCH_URL_PATH: &str = "/api/cloudsearch/pc";
const SEARCH_FULL_URL: &str = "https://interface.music.163.com/eapi/cloudsearch/pc";
const LYRIC_URL_PATH: &str = "/api/song/lyric/v1";
const LYRIC_FULL_URL: &str = "https://interface3.music.163.com/eapi/song/lyric/v1";

const USER_AGENT_PC: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Safari/537.36 Chrome/91.0.4472.164 NeteaseMusicDesktop/3.0.18.203152";

/// EAPI 请求头中携带的客户端信息。
#[derive(Debug, Clone)]
struct ClientConfig {
    device_id: String,
    os_version: String,
    app_version: String,
    version_code: String,
    channel: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            device_id: uuid::Uuid::new_v4().to_string(),
            os_version: "10".to_string(),
            app_version: "3.0.18".to_string(),
            version_code: "140".to_string(),
            channel: "netease".to_string(),
        }
    }
}

/// 网易云音乐的客户端实现。
#[derive(Debug, Clone)]
pub struct NeteaseClient {
    http_client: Client,
    config: ClientConfig,
}

impl Default for NeteaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NeteaseClient {
    /// 创建一个新的 NeteaseClient 实例。
    pub fn new() -> Self {
        Self::with_http_client(Client::new())
    }

    /// 使用调用方提供的 `reqwest::Client`（例如配置了代理或超时）创建实例。
    pub fn with_http_client(http_client: Client) -> Self {
        Self {
            http_client,
            config: ClientConfig::default(),
        }
    }

    /// 辅助函数，用于发送加密的 EAPI 请求。
    async fn post_eapi<T: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        url_path_segment: &str,
        full_url: &str,
        payload: &T,
    ) -> Result<R> {
        let encrypted_params_hex = crypto::prepare_eapi_params(url_path_segment, payload)?;
        let form_data = [("params", encrypted_params_hex)];

        let header_obj = self.build_eapi_header();
        let cookie_str = header_obj.as_object().map_or_else(String::new, |map| {
            map.iter()
                .filter_map(|(k, v)| {
                    v.as_str()
                        .filter(|s| !s.is_empty())
                        .map(|s| format!("{k}={s}"))
                })
                .collect::<Vec<_>>()
                .join("; ")
        });

        let cookie_value = cookie_str
            .parse::<HeaderValue>()
            .map_err(|e| LyricsHelperError::ApiError(format!("无法解析 EAPI COOKIE: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_PC));
        headers.insert(COOKIE, cookie_value);
        headers.insert(REFERER, HeaderValue::from_static(BASE_URL_NETEASE));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let response_text = self
            .http_client
            .post(full_url)
            .headers(headers)
            .form(&form_data)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if response_text.is_empty() {
            return Err(LyricsHelperError::ApiError(
                "EAPI 接口返回了空响应。".to_string(),
            ));
        }

        serde_json::from_str::<R>(&response_text).map_err(LyricsHelperError::from)
    }

    fn build_eapi_header(&self) -> serde_json::Value {
        let current_time_ms = Utc::now().timestamp_millis();
        let config = &self.config;

        json!({
            "os": "pc",
            "appver": config.app_version,
            "versioncode": config.version_code,
            "osver": config.os_version,
            "deviceId": config.device_id,
            "buildver": Utc::now().timestamp().to_string(),
            "resolution": "1920x1080",
            "channel": config.channel,
            "requestId": format!("{}_{:04}", current_time_ms, rand::random::<u16>() % 1000),
            "__csrf": "",
            "MUSIC_U": "",
        })
    }
}

/// 网易云的搜索接口只接受一个关键词，多个搜索词以空格连接。
fn build_keyword(query: &CatalogQuery) -> String {
    query
        .terms()
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 过滤掉空字符串，便于区分“没有该歌词”与“歌词为空”。
fn non_empty_lyric(data: Option<models::LyricData>) -> String {
    data.map(|d| d.lyric)
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_default()
}

#[async_trait]
impl Catalog for NeteaseClient {
    fn name(&self) -> &'static str {
        "netease"
    }

    async fn search_songs(&self, query: &CatalogQuery) -> Result<Vec<CatalogCandidate>> {
        let keyword = build_keyword(query);
        if keyword.is_empty() {
            return Ok(vec![]);
        }

        let payload = json!({
            "s": keyword,
            "type": "1", // 1 代表搜索单曲
            "limit": query.limit,
            "offset": 0,
            "total": true
        });

        let resp: models::SearchResult = self
            .post_eapi(SEARCH_URL_PATH, SEARCH_FULL_URL, &payload)
            .await?;

        if resp.code != 200 {
            warn!("网易云搜索接口返回非 200 状态码: {}", resp.code);
            return Err(LyricsHelperError::ApiError(format!(
                "网易云搜索接口返回非 200 状态码: {}",
                resp.code
            )));
        }

        let songs = resp.result.map(|r| r.songs).unwrap_or_default();
        debug!("网易云为关键词 '{}' 返回了 {} 首歌曲", keyword, songs.len());

        Ok(songs.into_iter().map(Into::into).collect())
    }

    async fn get_raw_lyrics(&self, key: u64) -> Result<RawLyrics> {
        let mut payload = json!({
            "id": key.to_string(),
            "cp": "false",
            "lv": "0",
            "kv": "0",
            "tv": "0",
            "rv": "0",
            "yv": "0",
            "ytv": "0",
            "yrv": "0",
            "csrf_token": ""
        });
        payload["header"] = self.build_eapi_header();

        let resp: models::LyricResult = self
            .post_eapi(LYRIC_URL_PATH, LYRIC_FULL_URL, &payload)
            .await?;

        if resp.code != 200 {
            return Err(LyricsHelperError::ApiError(format!(
                "网易云歌词接口返回非 200 状态码: {}",
                resp.code
            )));
        }

        Ok(RawLyrics {
            original: non_empty_lyric(resp.lrc),
            translation: non_empty_lyric(resp.tlyric),
        })
    }
}

impl From<models::Song> for CatalogCandidate {
    fn from(song: models::Song) -> Self {
        CatalogCandidate {
            key: song.id,
            title: song.name,
            album: song.album_info.name.unwrap_or_default(),
            artists: song
                .artist_info
                .into_iter()
                .filter_map(|a| a.name)
                .collect(),
            // 网易云的 duration 单位是毫秒
            duration_secs: song.duration / 1000,
            embedded: None,
        }
    }
}
