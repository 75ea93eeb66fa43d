//! 版式约定
//!
//! 源工资表与模板文件B都按固定列号读取，这里把这些列号集中成可配置项。
//! 读取时完全信任配置，不校验文件结构。

use serde::{Deserialize, Serialize};

/// 源工资表的标题行（1 起始）
pub const SOURCE_HEADER_ROW: u32 = 4;
/// 预算单位列（B列）
pub const BUDGET_UNIT_COLUMN: u32 = 2;
/// 工资金额列起止（Q列〜AD列，含两端）
pub const WAGE_FIRST_COLUMN: u32 = 17;
pub const WAGE_LAST_COLUMN: u32 = 30;

/// 模板文件B：单位列、项目列、回填列（J列）
pub const TEMPLATE_UNIT_COLUMN: u32 = 1;
pub const TEMPLATE_PROJECT_COLUMN: u32 = 2;
pub const TEMPLATE_TARGET_COLUMN: u32 = 10;

/// 源工资表版式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceLayout {
    /// 标题行。其上一行视为父标题（两行表头）。
    pub header_row: u32,
    pub budget_unit_column: u32,
    pub wage_first_column: u32,
    pub wage_last_column: u32,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            header_row: SOURCE_HEADER_ROW,
            budget_unit_column: BUDGET_UNIT_COLUMN,
            wage_first_column: WAGE_FIRST_COLUMN,
            wage_last_column: WAGE_LAST_COLUMN,
        }
    }
}

impl SourceLayout {
    /// 实际存在的工资列（超出表宽的列直接忽略）
    pub fn wage_columns(&self, max_column: u32) -> std::ops::RangeInclusive<u32> {
        self.wage_first_column..=self.wage_last_column.min(max_column)
    }

    /// 首个数据行
    pub fn first_data_row(&self) -> u32 {
        self.header_row + 1
    }
}

/// 模板文件B版式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateLayout {
    /// 标题行数，数据从下一行开始
    pub header_rows: u32,
    pub unit_column: u32,
    pub project_column: u32,
    pub target_column: u32,
    /// 前几个数据行未匹配时输出诊断
    pub unmatched_report_rows: u32,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            header_rows: 1,
            unit_column: TEMPLATE_UNIT_COLUMN,
            project_column: TEMPLATE_PROJECT_COLUMN,
            target_column: TEMPLATE_TARGET_COLUMN,
            unmatched_report_rows: 5,
        }
    }
}

impl TemplateLayout {
    pub fn first_data_row(&self) -> u32 {
        self.header_rows + 1
    }

    /// 该行未匹配时是否需要报告
    pub fn reports_unmatched(&self, row: u32) -> bool {
        row < self.first_data_row() + self.unmatched_report_rows
    }
}
