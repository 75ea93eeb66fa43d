//! 汇总与匹配共用的数据类型
//!
//! - WageRecord: 源表中一格工资数据
//! - TemplateRow: 模板文件B的一个数据行
//! - MatchResult: 一次匹配成功的结果

use serde::{Deserialize, Serialize};

/// 预算单位名称
pub type BudgetUnit = String;

/// 工资项目名称
pub type WageLabel = String;

/// (预算单位, 工资项目, 金额)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    pub unit: BudgetUnit,
    pub label: WageLabel,
    pub amount: f64,
}

/// 模板文件B的一行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRow {
    /// 行号（1 起始）
    pub row: u32,
    /// 单位列文本
    pub unit_text: String,
    /// 预算项目列文本
    pub project_text: String,
}

impl TemplateRow {
    pub fn new(row: u32, unit_text: impl Into<String>, project_text: impl Into<String>) -> Self {
        Self {
            row,
            unit_text: unit_text.into(),
            project_text: project_text.into(),
        }
    }
}

/// 匹配结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub row: u32,
    pub unit: BudgetUnit,
    pub label: WageLabel,
    pub value: f64,
}
