//! 歌词解析与合并模块

pub mod generators;
pub mod parsers;
pub mod types;
