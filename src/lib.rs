//! 工资表批量汇总与模板回填
//!
//! 汇总、匹配等纯逻辑在 `wage-merge-common` 中，本 crate 负责文件读写与命令行。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod log;
pub mod scanner;
pub mod summary;
pub mod template;
pub mod workbook;
