//! # LRC 格式解析器
//!
//! 只识别行首的单个时间戳标签，其余文本原样作为歌词内容。

use std::sync::LazyLock;

use regex::Regex;

use crate::converter::types::{LineMap, ParsedLyrics, Timestamp};

/// 匹配行首的 `[MM:SS]`、`[MM:SS.fff]` 或 `[MM:SS:fff]` 标签，捕获时间部分和其后的文本
static LRC_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d+):(\d+)(?:[.:](\d+))?\](.*)$").expect("未能编译 LRC_LINE_REGEX")
});

/// 尝试将一行文本解析为 (规范时间戳, 歌词文本)。
///
/// 行首没有时间戳标签时返回 `None`。标签后的文本可以为空。
pub fn parse_lrc_line(line: &str) -> Option<(Timestamp, &str)> {
    let caps = LRC_LINE_REGEX.captures(line)?;
    let minutes = caps.get(1).map_or("0", |m| m.as_str());
    let seconds = caps.get(2).map_or("0", |m| m.as_str());
    let fraction = caps.get(3).map(|m| m.as_str());
    let text = caps.get(4).map_or("", |m| m.as_str());

    Some((Timestamp::from_parts(minutes, seconds, fraction), text))
}

/// 解析一整段 LRC 文本。
///
/// 空白行会被跳过；其它无法识别的行（如 `[ar:...]` 等元数据标签）原样收集到
/// `unformatted` 中。同一时间戳出现多次时，保留最后一次的文本。
pub fn parse_lrc(content: &str) -> ParsedLyrics {
    let mut lines = LineMap::new();
    let mut unformatted = Vec::new();

    for raw_line in content.lines() {
        if raw_line.trim().is_empty() {
            continue;
        }

        match parse_lrc_line(raw_line) {
            Some((timestamp, text)) => {
                lines.insert(timestamp, text.to_string());
            }
            None => unformatted.push(raw_line.to_string()),
        }
    }

    ParsedLyrics { lines, unformatted }
}
