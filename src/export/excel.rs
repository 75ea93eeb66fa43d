//! 文件A（汇总结果）生成
//!
//! 第1行：预算单位列表头 + 各工资项目；之后每个预算单位一行，缺失值写 0。

use crate::error::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;
use wage_merge_common::AggregationTable;

const SHEET_NAME: &str = "Sheet1";
const UNIT_COL_WIDTH: f64 = 28.0;
const WAGE_COL_WIDTH: f64 = 14.0;

pub fn generate_summary(table: &AggregationTable, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let unit_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin);

    let value_format = Format::new()
        .set_num_format("0.00")
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let columns: Vec<&str> = table.columns().collect();

    worksheet.write_string_with_format(0, 0, table.unit_header(), &header_format)?;
    worksheet.set_column_width(0, UNIT_COL_WIDTH)?;
    for (i, label) in columns.iter().enumerate() {
        let col = (i + 1) as u16;
        worksheet.write_string_with_format(0, col, *label, &header_format)?;
        worksheet.set_column_width(col, WAGE_COL_WIDTH)?;
    }

    for (i, unit) in table.units().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string_with_format(row, 0, unit, &unit_format)?;
        for (j, label) in columns.iter().enumerate() {
            let col = (j + 1) as u16;
            worksheet.write_number_with_format(row, col, table.amount(unit, label), &value_format)?;
        }
    }

    worksheet.set_freeze_panes(1, 1)?;

    workbook.save(output_path)?;

    Ok(())
}
