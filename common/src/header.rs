//! 表头解析
//!
//! 工资表表头常占两行：上一行是父标题（往往横向合并），下一行是子标题。
//! 每列得到一个扁平的标签，例如父标题“工资”下的“基本”列解析为“工资-基本”。

use crate::sheet::SheetGrid;
use std::collections::HashMap;

/// 空表头列的占位标签
pub fn placeholder_label(col: u32) -> String {
    format!("列{}", col)
}

/// 合并感知地读取表头文本，空白视为缺失
fn header_text(grid: &SheetGrid, row: u32, col: u32) -> Option<String> {
    if row == 0 {
        return None;
    }
    let text = grid.effective_cell(row, col).text();
    (!text.is_empty()).then_some(text)
}

/// 由父标题、子标题组合出列标签
fn combine(parent: Option<String>, child: Option<String>, col: u32) -> String {
    match (parent, child) {
        (Some(parent), Some(child)) if parent != child => format!("{}-{}", parent, child),
        (Some(parent), _) => parent,
        (None, Some(child)) => child,
        (None, None) => placeholder_label(col),
    }
}

/// 重复标签从第二次出现起追加 `.1`、`.2`…，保证每列键唯一
pub fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(labels.len());

    for label in labels {
        if label.is_empty() {
            out.push(label);
            continue;
        }
        let count = seen.entry(label.clone()).or_insert(0);
        if *count == 0 {
            out.push(label);
        } else {
            out.push(format!("{}.{}", label, count));
        }
        *count += 1;
    }

    out
}

/// 解析第 `header_row` 行（及其上一行）的表头，返回 1..=max_column 每列一个标签
///
/// `header_row` 超出表的行数时每列都是空标签，由调用方按文件级错误处理。
pub fn resolve_headers(grid: &SheetGrid, header_row: u32) -> Vec<String> {
    let width = grid.max_column() as usize;
    if header_row == 0 || header_row > grid.max_row() {
        return vec![String::new(); width];
    }

    let labels = (1..=grid.max_column())
        .map(|col| {
            let parent = header_text(grid, header_row - 1, col);
            let child = header_text(grid, header_row, col);
            combine(parent, child, col)
        })
        .collect();

    dedupe_labels(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Cell, MergedRegion};

    fn grid_with_two_row_header() -> SheetGrid {
        let mut grid = SheetGrid::default();
        grid.set(3, 1, Cell::from("序号"));
        grid.set(3, 2, Cell::from("单位"));
        grid.set(3, 3, Cell::from("工资"));
        grid.set(4, 3, Cell::from("基本"));
        grid.set(4, 4, Cell::from("绩效"));
        grid.set(4, 5, Cell::from("扣款"));
        grid.set(5, 1, Cell::Number(1.0));
        grid.with_merged(vec![
            MergedRegion::new(3, 1, 4, 1),
            MergedRegion::new(3, 2, 4, 2),
            MergedRegion::new(3, 3, 3, 4),
        ])
    }

    #[test]
    fn test_two_row_merged_header() {
        let headers = resolve_headers(&grid_with_two_row_header(), 4);
        assert_eq!(headers.len(), 5);
        assert_eq!(&headers[2..4], &["工资-基本".to_string(), "工资-绩效".to_string()]);
    }

    #[test]
    fn test_vertical_merge_uses_single_value() {
        let headers = resolve_headers(&grid_with_two_row_header(), 4);
        assert_eq!(headers[0], "序号");
        assert_eq!(headers[1], "单位");
        assert_eq!(headers[4], "扣款");
    }

    #[test]
    fn test_empty_header_gets_placeholder() {
        let mut grid = SheetGrid::default();
        grid.set(4, 1, Cell::from("单位"));
        grid.set(5, 3, Cell::Number(1.0));
        let headers = resolve_headers(&grid, 4);
        assert_eq!(headers, vec!["单位", "列2", "列3"]);
    }

    #[test]
    fn test_parent_only() {
        let mut grid = SheetGrid::default();
        grid.set(3, 1, Cell::from("合计"));
        grid.set(4, 2, Cell::from("备注"));
        let headers = resolve_headers(&grid, 4);
        assert_eq!(headers, vec!["合计", "备注"]);
    }

    #[test]
    fn test_header_row_out_of_range() {
        let mut grid = SheetGrid::default();
        grid.set(2, 3, Cell::from("x"));
        let headers = resolve_headers(&grid, 4);
        assert_eq!(headers, vec![String::new(); 3]);
        assert!(resolve_headers(&grid, 0).iter().all(String::is_empty));
    }

    #[test]
    fn test_header_row_one_has_no_parent() {
        let mut grid = SheetGrid::default();
        grid.set(1, 1, Cell::from("A"));
        assert_eq!(resolve_headers(&grid, 1), vec!["A"]);
    }

    #[test]
    fn test_duplicate_labels() {
        let labels = vec!["补贴".into(), "补贴".into(), "扣款".into(), "补贴".into()];
        assert_eq!(dedupe_labels(labels), vec!["补贴", "补贴.1", "扣款", "补贴.2"]);
    }
}
