//! 工资汇总
//!
//! 单个文件：取预算单位列与固定范围的工资列，按单位分组求和。
//! 多个文件：分组结果再按单位、原始列名累加成汇总表；
//! 扁平查找表则在逐文件阶段按规范化后的列名写入，之后不再重建。
//!
//! 因此两个文件的不同原始列名规范化后相同时，汇总表是累加值，
//! 查找表却是后一个文件的值（后写覆盖）。这一差异保持原样。

use crate::alias::normalize_label;
use crate::error::{Error, Result};
use crate::header::resolve_headers;
use crate::layout::SourceLayout;
use crate::lookup::FlatLookupMap;
use crate::sheet::SheetGrid;
use crate::types::{BudgetUnit, WageLabel, WageRecord};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};

/// 单个文件的分组结果
#[derive(Debug, Clone, Default)]
pub struct DocumentAggregate {
    /// 预算单位列的表头
    pub unit_header: String,
    /// 工资列标签（原始、按列顺序）
    pub labels: Vec<WageLabel>,
    /// 单位 → 各工资列合计（与 `labels` 对齐）
    pub groups: BTreeMap<BudgetUnit, Vec<f64>>,
    /// 逐格原始记录
    pub records: Vec<WageRecord>,
}

impl DocumentAggregate {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 按 (单位, 原始列名, 合计) 展开
    pub fn triples(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.groups.iter().flat_map(move |(unit, sums)| {
            self.labels
                .iter()
                .zip(sums)
                .map(move |(label, amount)| (unit.as_str(), label.as_str(), *amount))
        })
    }
}

/// 汇总单个工作表
pub fn aggregate_one(grid: &SheetGrid, layout: &SourceLayout) -> Result<DocumentAggregate> {
    let headers = resolve_headers(grid, layout.header_row);
    if headers.iter().all(String::is_empty) {
        return Err(Error::UnreadableHeader { row: layout.header_row });
    }

    let width = grid.max_column();
    let unit_col = layout.budget_unit_column;
    if unit_col == 0 || unit_col > width {
        return Err(Error::MissingColumn { column: unit_col, width });
    }

    let wage_columns: Vec<u32> = layout.wage_columns(width).filter(|c| *c >= 1).collect();
    let labels: Vec<WageLabel> = wage_columns
        .iter()
        .map(|col| headers[*col as usize - 1].clone())
        .collect();

    let mut groups: BTreeMap<BudgetUnit, Vec<f64>> = BTreeMap::new();
    let mut records = Vec::new();

    for row in layout.first_data_row()..=grid.max_row() {
        // 单位为空的行不参与分组
        let unit = grid.cell(row, unit_col).text();
        if unit.is_empty() {
            continue;
        }

        let sums = groups
            .entry(unit.clone())
            .or_insert_with(|| vec![0.0; labels.len()]);

        for (i, (col, label)) in wage_columns.iter().zip(&labels).enumerate() {
            let amount = grid.cell(row, *col).amount();
            sums[i] += amount;
            records.push(WageRecord {
                unit: unit.clone(),
                label: label.clone(),
                amount,
            });
        }
    }

    Ok(DocumentAggregate {
        unit_header: headers[unit_col as usize - 1].clone(),
        labels,
        groups,
        records,
    })
}

/// 跨文件汇总表：单位 → (原始列名 → 合计)
#[derive(Debug, Clone, Default)]
pub struct AggregationTable {
    unit_header: String,
    columns: IndexSet<WageLabel>,
    rows: BTreeMap<BudgetUnit, HashMap<WageLabel, f64>>,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预算单位列表头（文件A的左上角）
    pub fn unit_header(&self) -> &str {
        &self.unit_header
    }

    /// 只在尚未设置时生效，保留第一个文件的表头
    pub fn set_unit_header(&mut self, header: &str) {
        if self.unit_header.is_empty() {
            self.unit_header = header.trim().to_string();
        }
    }

    /// 注册列名（不改变已有顺序）
    pub fn add_column(&mut self, label: &str) {
        if !self.columns.contains(label) {
            self.columns.insert(label.to_string());
        }
    }

    /// 累加一个金额
    pub fn add(&mut self, unit: &str, label: &str, amount: f64) {
        self.add_column(label);
        *self
            .rows
            .entry(unit.to_string())
            .or_default()
            .entry(label.to_string())
            .or_insert(0.0) += amount;
    }

    /// 合并一个文件的分组结果
    pub fn merge_document(&mut self, doc: &DocumentAggregate) {
        self.set_unit_header(&doc.unit_header);
        for label in &doc.labels {
            self.add_column(label);
        }
        for (unit, label, amount) in doc.triples() {
            self.add(unit, label, amount);
        }
    }

    /// 单位按字典序
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// 列按首次出现顺序
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// 缺失的 (单位, 列) 视为 0
    pub fn amount(&self, unit: &str, label: &str) -> f64 {
        self.rows
            .get(unit)
            .and_then(|row| row.get(label))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn unit_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 汇总产物
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub table: AggregationTable,
    pub lookup: FlatLookupMap,
    /// 提供了数据的文件数
    pub documents: usize,
}

/// 汇总结果。没有任何文件提供数据时为 `NoData`，调用方必须显式检查。
#[must_use]
#[derive(Debug, Clone)]
pub enum AggregateOutcome {
    NoData,
    Aggregated(Aggregation),
}

/// 逐文件累加器
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Aggregation,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一个文件的结果
    ///
    /// 查找表按 (单位, 规范化列名) 写入，重复键后写覆盖。
    pub fn add_document(&mut self, doc: &DocumentAggregate) {
        for (unit, label, amount) in doc.triples() {
            self.state.lookup.insert(unit, &normalize_label(label), amount);
        }

        if doc.is_empty() {
            return;
        }
        self.state.table.merge_document(doc);
        self.state.documents += 1;
    }

    pub fn table(&self) -> &AggregationTable {
        &self.state.table
    }

    pub fn lookup(&self) -> &FlatLookupMap {
        &self.state.lookup
    }

    pub fn finish(self) -> AggregateOutcome {
        if self.state.documents == 0 {
            AggregateOutcome::NoData
        } else {
            AggregateOutcome::Aggregated(self.state)
        }
    }
}
