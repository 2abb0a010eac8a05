//! 库中通用的数据模型。

pub mod identifier;
pub mod track;
