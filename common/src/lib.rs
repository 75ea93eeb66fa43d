//! 工资汇总核心库
//!
//! 不做任何文件读写：表格读入、文件A/B的输出都在上层 crate。

pub mod sheet;
pub mod layout;
pub mod alias;
pub mod error;
pub mod header;
pub mod types;
pub mod lookup;
pub mod aggregate;
pub mod matcher;
pub mod log;

pub use sheet::{Cell, MergedRegion, SheetGrid};
pub use layout::{SourceLayout, TemplateLayout};
pub use alias::normalize_label;
pub use error::{Error, Result};
pub use header::resolve_headers;
pub use types::{BudgetUnit, MatchResult, TemplateRow, WageLabel, WageRecord};
pub use lookup::{FlatLookupMap, LookupKey};
pub use aggregate::{aggregate_one, AggregateOutcome, Aggregation, AggregationTable, Aggregator, DocumentAggregate};
pub use matcher::{match_rows, MatchReport, Matcher};
pub use log::{LogEvent, LogLevel, MemoryLog, RunLog};
