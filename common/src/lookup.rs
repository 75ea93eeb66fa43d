//! 扁平查找表
//!
//! (预算单位, 规范化后的工资项目) → 金额。匹配时按插入顺序遍历，先命中者生效，
//! 所以这里必须是有序表：重复插入只覆盖值，保留首次插入的位置。

use crate::aggregate::AggregationTable;
use crate::alias::normalize_label;
use indexmap::IndexMap;

/// 查找键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub unit: String,
    pub label: String,
}

impl LookupKey {
    pub fn new(unit: impl Into<String>, label: impl Into<String>) -> Self {
        Self { unit: unit.into(), label: label.into() }
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.unit, self.label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlatLookupMap {
    entries: IndexMap<LookupKey, f64>,
}

impl FlatLookupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖。单位与项目名都会去除首尾空白。
    pub fn insert(&mut self, unit: &str, label: &str, amount: f64) {
        let key = LookupKey::new(unit.trim(), label.trim());
        self.entries.insert(key, amount);
    }

    pub fn get(&self, unit: &str, label: &str) -> Option<f64> {
        self.entries.get(&LookupKey::new(unit, label)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LookupKey, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 由汇总表重建查找表（读回文件A时使用）
    ///
    /// 按行、列顺序插入，列名先规范化。与逐文件构建不同，这里的值是跨文件累加后的。
    pub fn from_table(table: &AggregationTable) -> Self {
        let mut map = Self::new();
        for unit in table.units() {
            for label in table.columns() {
                map.insert(unit, &normalize_label(label), table.amount(unit, label));
            }
        }
        map
    }
}
