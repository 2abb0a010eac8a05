//! LRC 格式生成器
//!
//! 将原文与翻译合并为一份按时间排序的 LRC 文本，翻译行紧跟在同一时间戳的原文行之后。

use std::collections::BTreeSet;

use crate::converter::types::{LineMap, ParsedLyrics, Timestamp};

/// 合并原文和翻译歌词。
///
/// 输出依次为：原文中所有无时间戳的行（原样、原顺序）；
/// 然后对两份映射中出现过的每个时间戳（升序）输出一行原文
/// （原文缺失该时间戳时文本为空），若翻译在该时间戳有非空文本，再输出一行翻译。
/// 每行以 `\n` 结尾。
pub fn generate_merged_lrc(original: &ParsedLyrics, translation: &LineMap) -> String {
    let mut output = String::with_capacity((original.lines.len() + translation.len()) * 40);

    for line in &original.unformatted {
        output.push_str(line);
        output.push('\n');
    }

    let timestamps: BTreeSet<&Timestamp> =
        original.lines.keys().chain(translation.keys()).collect();

    for timestamp in timestamps {
        let original_text = original.lines.get(timestamp).map_or("", String::as_str);
        write_line(&mut output, timestamp, original_text);

        if let Some(translated_text) = translation.get(timestamp).filter(|t| !t.is_empty()) {
            write_line(&mut output, timestamp, translated_text);
        }
    }

    output
}

fn write_line(output: &mut String, timestamp: &Timestamp, text: &str) {
    output.push_str(timestamp.as_str());
    output.push_str(text);
    output.push('\n');
}
