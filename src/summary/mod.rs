//! 文件夹批量汇总（生成文件A）
//!
//! 单个文件读取或汇总失败只记录并跳过，其余文件照常处理。
//! 所有文件都没有数据时返回 [`SummaryOutcome::NoData`]，不生成文件A。

use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::scanner::{self, SourceFile};
use crate::workbook;
use std::path::{Path, PathBuf};
use wage_merge_common::{
    aggregate_one, AggregateOutcome, AggregationTable, Aggregator, DocumentAggregate,
    FlatLookupMap, LogEvent, RunLog, SourceLayout,
};

/// 批量汇总的产物
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// 文件A路径
    pub path: PathBuf,
    pub table: AggregationTable,
    /// 逐文件构建的查找表（回填文件B用）
    pub lookup: FlatLookupMap,
    /// 提供了数据的文件数
    pub documents: usize,
    /// 读取失败而跳过的文件
    pub skipped: Vec<String>,
}

#[must_use]
#[derive(Debug, Clone)]
pub enum SummaryOutcome {
    NoData,
    Written(SummaryReport),
}

fn aggregate_file(file: &SourceFile, layout: &SourceLayout) -> Result<DocumentAggregate> {
    let grid = workbook::load_source(file)?;
    Ok(aggregate_one(&grid, layout)?)
}

/// 汇总文件夹下的所有工资表并写出文件A
pub fn aggregate_folder(
    folder: &Path,
    output_dir: Option<&Path>,
    config: &Config,
    log: &mut dyn RunLog,
) -> Result<SummaryOutcome> {
    let output_path = export::summary_output_path(config, folder, output_dir);
    let files = scanner::scan_folder(folder, &[config.summary_file_name.as_str()])?;

    let mut aggregator = Aggregator::new();
    let mut skipped = Vec::new();

    for file in &files {
        log.record(LogEvent::FileStarted { file: file.file_name.clone() });

        match aggregate_file(file, &config.source) {
            Ok(doc) => aggregator.add_document(&doc),
            Err(e) => {
                log.record(LogEvent::FileSkipped {
                    file: file.file_name.clone(),
                    reason: e.to_string(),
                });
                skipped.push(file.file_name.clone());
            }
        }
    }

    let result = match aggregator.finish() {
        AggregateOutcome::NoData => {
            log.record(LogEvent::NoData);
            return Ok(SummaryOutcome::NoData);
        }
        AggregateOutcome::Aggregated(result) => result,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    export::excel::generate_summary(&result.table, &output_path)?;

    log.record(LogEvent::SummaryWritten { path: output_path.display().to_string() });
    log.record(LogEvent::ValuesCollected { count: result.lookup.len() });

    Ok(SummaryOutcome::Written(SummaryReport {
        path: output_path,
        table: result.table,
        lookup: result.lookup,
        documents: result.documents,
        skipped,
    }))
}

/// 读回文件A
///
/// 第1行为表头（A1 是预算单位列名），A列为预算单位，其余列为各工资项目。
pub fn read_summary(path: &Path) -> Result<AggregationTable> {
    let grid = workbook::load_xlsx(path, None)?;
    let mut table = AggregationTable::new();
    table.set_unit_header(&grid.cell(1, 1).text());

    let labels: Vec<(u32, String)> = (2..=grid.max_column())
        .map(|col| (col, grid.cell(1, col).text()))
        .filter(|(_, label)| !label.is_empty())
        .collect();

    for (_, label) in &labels {
        table.add_column(label);
    }

    for row in 2..=grid.max_row() {
        let unit = grid.cell(row, 1).text();
        if unit.is_empty() {
            continue;
        }
        for (col, label) in &labels {
            table.add(&unit, label, grid.cell(row, *col).amount());
        }
    }

    Ok(table)
}
