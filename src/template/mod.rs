//! 文件B回填
//!
//! 读取模板活动工作表的单位列与项目列，按查找表匹配后，把数值写入目标列。
//! 输出为 `updated_` + 原文件名，原模板不改动。

pub mod package;
pub mod patch;

use crate::config::Config;
use crate::error::{Result, WageError};
use crate::export;
use crate::workbook;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use wage_merge_common::{
    match_rows, FlatLookupMap, LogEvent, MatchResult, RunLog, SheetGrid, TemplateLayout,
    TemplateRow,
};
use zip::ZipArchive;

/// 回填结果
#[derive(Debug, Clone)]
pub struct FilledTemplate {
    pub output_path: PathBuf,
    /// 回填的工作表名
    pub sheet: String,
    pub matches: Vec<MatchResult>,
    pub unmatched: Vec<u32>,
}

impl FilledTemplate {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// 从数据起始行开始读取模板行
pub fn read_rows(grid: &SheetGrid, layout: &TemplateLayout) -> Vec<TemplateRow> {
    (layout.first_data_row()..=grid.max_row())
        .map(|row| {
            TemplateRow::new(
                row,
                grid.cell(row, layout.unit_column).text(),
                grid.cell(row, layout.project_column).text(),
            )
        })
        .collect()
}

/// 回填文件B。失败时记录一条 `TemplateFailed` 并返回错误。
pub fn fill_template(
    template: &Path,
    lookup: &FlatLookupMap,
    config: &Config,
    output_dir: Option<&Path>,
    log: &mut dyn RunLog,
) -> Result<FilledTemplate> {
    match try_fill(template, lookup, config, output_dir, log) {
        Ok(filled) => Ok(filled),
        Err(e) => {
            log.record(LogEvent::TemplateFailed { reason: e.to_string() });
            Err(e)
        }
    }
}

fn try_fill(
    template: &Path,
    lookup: &FlatLookupMap,
    config: &Config,
    output_dir: Option<&Path>,
    log: &mut dyn RunLog,
) -> Result<FilledTemplate> {
    if !template.is_file() {
        return Err(WageError::FileNotFound(template.display().to_string()));
    }

    let file = File::open(template)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let sheet = package::locate_active_sheet(&mut archive)?;

    let grid = workbook::load_xlsx(template, Some(&sheet.name))?;
    let rows = read_rows(&grid, &config.template);
    let report = match_rows(&rows, lookup, &config.template, log);

    let values: BTreeMap<u32, f64> = report.matches.iter().map(|m| (m.row, m.value)).collect();
    let xml = package::read_part(&mut archive, &sheet.path)?;
    let patched = patch::patch_sheet_xml(&xml, config.template.target_column, &values)?;
    let bytes = package::rewrite_package(&mut archive, &sheet.path, &patched)?;

    let output_path = export::updated_template_path(config, template, output_dir);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, bytes)?;

    log.record(LogEvent::MatchTotal { count: report.match_count() });
    log.record(LogEvent::TemplateWritten { path: output_path.display().to_string() });

    Ok(FilledTemplate {
        output_path,
        sheet: sheet.name,
        matches: report.matches,
        unmatched: report.unmatched,
    })
}
