//! 错误类型定义

use thiserror::Error;

/// 核心错误
#[derive(Error, Debug)]
pub enum Error {
    #[error("表头无法读取: 第{row}行不存在或为空")]
    UnreadableHeader { row: u32 },

    #[error("缺少第{column}列 (表宽 {width} 列)")]
    MissingColumn { column: u32, width: u32 },
}

/// Result 别名
pub type Result<T> = std::result::Result<T, Error>;
