//! 定义了歌词解析与合并中使用的核心数据类型。

use std::collections::BTreeMap;
use std::fmt;

/// LRC 时间戳的规范形式，例如 `[01:23.450]`。
///
/// 分、秒至少两位，毫秒恰好三位，因此字符串的字典序与时间先后一致。
/// 两个时间戳当且仅当规范字符串完全相同时相等。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// 由时间戳标签中的数字部分构造规范时间戳。
    ///
    /// 分和秒按原样保留（不做进位），不足两位时左侧补零。
    /// 毫秒部分右侧补零或截断到三位，缺失时为 `000`。
    pub(crate) fn from_parts(minutes: &str, seconds: &str, fraction: Option<&str>) -> Self {
        let mut millis: String = fraction.unwrap_or_default().chars().take(3).collect();
        while millis.len() < 3 {
            millis.push('0');
        }
        Self(format!("[{minutes:0>2}:{seconds:0>2}.{millis}]"))
    }

    /// 返回规范字符串。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 时间戳到歌词文本的映射，按时间排序。重复的时间戳以后出现的为准。
pub type LineMap = BTreeMap<Timestamp, String>;

/// 一段原始歌词文本的解析结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLyrics {
    /// 带时间戳的歌词行。
    pub lines: LineMap,
    /// 没有时间戳的行，保持原始顺序。
    pub unformatted: Vec<String>,
}

impl ParsedLyrics {
    /// 带时间戳的行数。
    pub fn timed_line_count(&self) -> usize {
        self.lines.len()
    }
}
