//! 模板行匹配
//!
//! 模板文件B每个数据行按“单位”“项目”两列文本去查找表里找值：
//! - 单位：去掉连字符与空格后，双向子串包含即视为一致
//! - 项目：查找表中的工资项目名是项目文本的子串
//!
//! 按查找表顺序扫描，第一个同时满足的键生效，不做打分。

use crate::layout::TemplateLayout;
use crate::log::{LogEvent, RunLog};
use crate::lookup::{FlatLookupMap, LookupKey};
use crate::types::{MatchResult, TemplateRow};

/// 去掉所有 `-` 与空格
pub fn clean_unit(text: &str) -> String {
    text.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// 单位双向包含（参数均为已清洗文本）
pub fn unit_matches(key_unit: &str, row_unit: &str) -> bool {
    row_unit.contains(key_unit) || key_unit.contains(row_unit)
}

/// 项目文本包含工资项目名
pub fn wage_matches(label: &str, project_text: &str) -> bool {
    project_text.contains(label)
}

/// 预先清洗过单位名的查找表视图
pub struct Matcher<'a> {
    keys: Vec<(String, &'a LookupKey, f64)>,
}

impl<'a> Matcher<'a> {
    pub fn new(lookup: &'a FlatLookupMap) -> Self {
        let keys = lookup
            .iter()
            .map(|(key, value)| (clean_unit(&key.unit), key, value))
            .collect();
        Self { keys }
    }

    /// 返回第一个命中的键与值
    pub fn find(&self, row: &TemplateRow) -> Option<(&'a LookupKey, f64)> {
        let row_unit = clean_unit(&row.unit_text);
        self.keys
            .iter()
            .find(|(unit, key, _)| {
                unit_matches(unit, &row_unit) && wage_matches(&key.label, &row.project_text)
            })
            .map(|(_, key, value)| (*key, *value))
    }
}

/// 匹配报告
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    pub matches: Vec<MatchResult>,
    /// 未匹配的行号
    pub unmatched: Vec<u32>,
}

impl MatchReport {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// 匹配所有数据行（标题行自动跳过）
pub fn match_rows(
    rows: &[TemplateRow],
    lookup: &FlatLookupMap,
    layout: &TemplateLayout,
    log: &mut dyn RunLog,
) -> MatchReport {
    let matcher = Matcher::new(lookup);
    let mut report = MatchReport::default();

    for row in rows.iter().filter(|r| r.row >= layout.first_data_row()) {
        match matcher.find(row) {
            Some((key, value)) => {
                log.record(LogEvent::RowMatched {
                    row: row.row,
                    unit_text: row.unit_text.clone(),
                    unit: key.unit.clone(),
                    project_text: row.project_text.clone(),
                    label: key.label.clone(),
                    value,
                });
                report.matches.push(MatchResult {
                    row: row.row,
                    unit: key.unit.clone(),
                    label: key.label.clone(),
                    value,
                });
            }
            None => {
                if layout.reports_unmatched(row.row) {
                    log.record(LogEvent::RowUnmatched {
                        row: row.row,
                        unit_text: row.unit_text.clone(),
                        project_text: row.project_text.clone(),
                    });
                }
                report.unmatched.push(row.row);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemoryLog;

    fn lookup(entries: &[(&str, &str, f64)]) -> FlatLookupMap {
        let mut map = FlatLookupMap::new();
        for (unit, label, value) in entries {
            map.insert(unit, label, *value);
        }
        map
    }

    #[test]
    fn test_clean_unit() {
        assert_eq!(clean_unit("一中心 - 本部"), "一中心本部");
        assert_eq!(clean_unit(""), "");
    }

    #[test]
    fn test_unit_match_is_symmetric() {
        assert!(unit_matches(&clean_unit("一中心"), &clean_unit("一中心-本部")));
        assert!(unit_matches(&clean_unit("一中心-本部办公室"), &clean_unit("一中心")));
        assert!(!unit_matches(&clean_unit("二中心"), &clean_unit("一中心-本部")));
    }

    #[test]
    fn test_wage_match_uses_raw_label() {
        assert!(wage_matches("基础工资", "基础工资发放"));
        assert!(!wage_matches("基础 工资", "基础工资发放"));
    }

    #[test]
    fn test_first_match_wins() {
        let map = lookup(&[("一中心", "基础工资", 1.0), ("一中心本部", "基础工资", 2.0)]);
        let rows = vec![TemplateRow::new(2, "一中心-本部", "基础工资发放")];
        let mut log = MemoryLog::new();
        let report = match_rows(&rows, &map, &TemplateLayout::default(), &mut log);

        assert_eq!(report.match_count(), 1);
        assert_eq!(report.matches[0].value, 1.0);
        assert_eq!(report.matches[0].unit, "一中心");
    }

    #[test]
    fn test_header_row_skipped() {
        let map = lookup(&[("单位", "项目", 1.0)]);
        let rows = vec![TemplateRow::new(1, "单位", "项目"), TemplateRow::new(2, "单位", "项目")];
        let report = match_rows(&rows, &map, &TemplateLayout::default(), &mut MemoryLog::new());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].row, 2);
    }

    #[test]
    fn test_unmatched_rows_reported_in_window() {
        let map = lookup(&[("A单位", "基础工资", 1.0)]);
        let rows: Vec<TemplateRow> = (2..=9).map(|r| TemplateRow::new(r, "B单位", "基础工资")).collect();
        let mut log = MemoryLog::new();
        let report = match_rows(&rows, &map, &TemplateLayout::default(), &mut log);

        assert_eq!(report.match_count(), 0);
        assert_eq!(report.unmatched.len(), 8);
        // 只报告第2〜6行
        assert_eq!(log.events.len(), 5);
        assert!(log.lines()[0].starts_with("未匹配: 行2"));
    }

    #[test]
    fn test_blank_unit_matches_on_label_only() {
        let map = lookup(&[("A单位", "基础工资", 9.0)]);
        let rows = vec![TemplateRow::new(2, "", "基础工资")];
        let report = match_rows(&rows, &map, &TemplateLayout::default(), &mut MemoryLog::new());
        assert_eq!(report.match_count(), 1);
    }

    #[test]
    fn test_match_logged() {
        let map = lookup(&[("A单位", "基础工资", 150.0)]);
        let rows = vec![TemplateRow::new(2, "A单位-本部", "基础工资发放")];
        let mut log = MemoryLog::new();
        let report = match_rows(&rows, &map, &TemplateLayout::default(), &mut log);
        assert_eq!(report.matches[0].value, 150.0);
        assert!(matches!(log.events[0], LogEvent::RowMatched { row: 2, .. }));
    }
}
