//! 表格读取
//!
//! calamine 读入后转成核心库的 [`SheetGrid`]。
//! - `.xlsx`：读取指定（默认第一张）工作表的值与合并区域
//! - `.xls`：旧格式只复制第一张表的值，不含格式与合并区域

use crate::error::{Result, WageError};
use crate::scanner::{SourceFile, SourceKind};
use calamine::{open_workbook, open_workbook_auto, Data, Dimensions, Range, Reader, Xlsx};
use std::path::Path;
use wage_merge_common::{Cell, MergedRegion, SheetGrid};

/// calamine 单元格 → 核心库单元格
pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
        // 日期、时长按文本处理，金额列里会被当作 0
        other => Cell::Text(other.to_string()),
    }
}

/// Range 使用绝对坐标，左上角不一定是 A1
pub fn range_to_grid(range: &Range<Data>) -> SheetGrid {
    let Some((last_row, last_col)) = range.end() else {
        return SheetGrid::default();
    };

    let rows = (0..=last_row)
        .map(|r| {
            (0..=last_col)
                .map(|c| range.get_value((r, c)).map(to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    SheetGrid::new(rows)
}

fn to_region(dims: &Dimensions) -> MergedRegion {
    MergedRegion::new(dims.start.0 + 1, dims.start.1 + 1, dims.end.0 + 1, dims.end.1 + 1)
}

fn first_sheet_name(names: &[String], path: &Path) -> Result<String> {
    names
        .first()
        .cloned()
        .ok_or_else(|| WageError::SheetNotFound(format!("{} 中没有工作表", path.display())))
}

/// 读取 xlsx 工作表（含合并区域）
pub fn load_xlsx(path: &Path, sheet: Option<&str>) -> Result<SheetGrid> {
    if !path.exists() {
        return Err(WageError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let name = match sheet {
        Some(name) => name.to_string(),
        None => first_sheet_name(&workbook.sheet_names(), path)?,
    };

    let range = workbook.worksheet_range(&name)?;

    workbook.load_merged_regions()?;
    let merged = workbook
        .merged_regions_by_sheet(&name)
        .into_iter()
        .map(|(_, _, dims)| to_region(dims))
        .collect();

    Ok(range_to_grid(&range).with_merged(merged))
}

/// 旧版 .xls：第一张表逐格复制值
pub fn load_legacy(path: &Path) -> Result<SheetGrid> {
    if !path.exists() {
        return Err(WageError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let name = first_sheet_name(&workbook.sheet_names(), path)?;
    let range = workbook.worksheet_range(&name)?;

    Ok(range_to_grid(&range))
}

/// 按扫描到的格式读取源表
pub fn load_source(file: &SourceFile) -> Result<SheetGrid> {
    match file.kind {
        SourceKind::Xlsx => load_xlsx(&file.path, None),
        SourceKind::Xls => load_legacy(&file.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(to_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(to_cell(&Data::String("A单位".into())), Cell::from("A单位"));
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Error(CellErrorType::NA)), Cell::Error("#N/A".into()));
    }

    #[test]
    fn test_range_offset_is_absolute() {
        // 数据从 C3 开始
        let mut range = Range::new((2, 2), (3, 3));
        range.set_value((2, 2), Data::String("x".into()));
        range.set_value((3, 3), Data::Float(2.0));

        let grid = range_to_grid(&range);
        assert_eq!(grid.max_row(), 4);
        assert_eq!(grid.max_column(), 4);
        assert_eq!(grid.cell(3, 3), &Cell::from("x"));
        assert_eq!(grid.cell(4, 4), &Cell::Number(2.0));
        assert_eq!(grid.cell(1, 1), &Cell::Empty);
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert_eq!(range_to_grid(&range).max_row(), 0);
    }

    #[test]
    fn test_missing_file() {
        let result = load_xlsx(Path::new("/nonexistent/a.xlsx"), None);
        assert!(matches!(result, Err(WageError::FileNotFound(_))));
    }
}
