//! 工作表格子模型
//!
//! 表格文件读入后的内存表示。行列均为 1 起始，合并区域为闭区间。
//! 读取层（calamine）负责把各种单元格类型收敛到 [`Cell`]。

use serde::{Deserialize, Serialize};

/// 单元格值
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// `#N/A` 等错误值
    Error(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// 文本表示（已去除首尾空白）。空单元格为空串。
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Bool(b) => if *b { "TRUE".into() } else { "FALSE".into() },
            Cell::Error(e) => e.trim().to_string(),
        }
    }

    /// 金额强制转换：非数值一律为 0
    pub fn amount(&self) -> f64 {
        match self {
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// 合并单元格区域（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRegion {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergedRegion {
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        Self { first_row, first_col, last_row, last_col }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

/// 一张工作表
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
    merged: Vec<MergedRegion>,
    width: u32,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        Self { rows, merged: Vec::new(), width }
    }

    pub fn with_merged(mut self, merged: Vec<MergedRegion>) -> Self {
        self.merged = merged;
        self
    }

    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn max_column(&self) -> u32 {
        self.width
    }

    pub fn merged_regions(&self) -> &[MergedRegion] {
        &self.merged
    }

    /// 原始单元格。越界返回空。
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        if row == 0 || col == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 合并感知的单元格：区域内任一格都取左上角的值
    pub fn effective_cell(&self, row: u32, col: u32) -> &Cell {
        match self.merged.iter().find(|m| m.contains(row, col)) {
            Some(region) => self.cell(region.first_row, region.first_col),
            None => self.cell(row, col),
        }
    }

    /// 写入单元格，必要时扩展格子
    pub fn set(&mut self, row: u32, col: u32, value: Cell) {
        if row == 0 || col == 0 {
            return;
        }
        let (r, c) = (row as usize - 1, col as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let line = &mut self.rows[r];
        if line.len() <= c {
            line.resize(c + 1, Cell::Empty);
        }
        line[c] = value;
        self.width = self.width.max(col);
    }
}
