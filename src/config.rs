//! 搜索配置，以及它的持久化。
//!
//! `LyricsConfig` 是一个只读的值，每次搜索时由调用方显式传入。
//! 宿主程序可以自行保存它，也可以使用这里提供的 JSON 文件读写函数。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

const CONFIG_DIR_NAME: &str = "netease-lyrics-helper";
const CONFIG_FILE_NAME: &str = "config.json";

/// 控制候选歌曲匹配策略的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LyricsConfig {
    /// 为 `true` 时使用严格策略（按时长过滤），否则使用模糊策略。
    pub strict: bool,
    /// 模糊策略下，不把艺术家作为必需字段和搜索词。
    pub exclude_artist: bool,
    /// 模糊策略下，不把专辑作为必需字段和搜索词。
    pub exclude_album: bool,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            strict: true,
            exclude_artist: false,
            exclude_album: false,
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "config.json"。
pub(crate) fn get_config_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    }
}

/// 从配置文件加载搜索配置。
///
/// 文件不存在时返回默认配置，不会创建文件。
pub fn load_config() -> Result<LyricsConfig, Box<dyn std::error::Error>> {
    let config_path = get_config_file_path(CONFIG_FILE_NAME)?;
    match fs::read_to_string(&config_path) {
        Ok(content) => {
            let config: LyricsConfig = serde_json::from_str(&content)?;
            info!("已从 {:?} 加载配置: {:?}", config_path, config);
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("配置文件不存在，使用默认配置。");
            Ok(LyricsConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 将搜索配置序列化为 JSON 并保存到配置文件。
pub fn save_config(config: &LyricsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = get_config_file_path(CONFIG_FILE_NAME)?;
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content)?;
    info!("配置已保存。");
    Ok(())
}
