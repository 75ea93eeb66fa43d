//! 测试用 xlsx 生成
//!
//! 工资表版式：第4行表头（第3行为父标题），B列预算单位，Q列起为工资项目。

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// (预算单位, 基础工资, 绩效工资-奖励, 绩效工资-考核)
pub type PayrollRow<'a> = (&'a str, f64, f64, f64);

pub fn write_payroll(path: &Path, rows: &[PayrollRow<'_>]) {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "2024年工资发放表").unwrap();
    sheet.write_string(3, 0, "序号").unwrap();
    sheet.write_string(3, 1, "预算单位").unwrap();
    sheet.write_string(3, 16, "基础工资").unwrap();
    sheet.merge_range(2, 17, 2, 18, "绩效工资", &bold).unwrap();
    sheet.write_string(3, 17, "奖励").unwrap();
    sheet.write_string(3, 18, "考核").unwrap();

    for (i, (unit, basic, bonus, review)) in rows.iter().enumerate() {
        let row = 4 + i as u32;
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        sheet.write_string(row, 1, *unit).unwrap();
        sheet.write_number(row, 16, *basic).unwrap();
        sheet.write_number(row, 17, *bonus).unwrap();
        sheet.write_number(row, 18, *review).unwrap();
    }

    workbook.save(path).unwrap();
}

/// 模板文件B：A列单位、B列项目、J列回填
///
/// - 第2行 J 列是带格式的空白单元格，K 列有备注
/// - 第3行 J 列原有文字
/// - 第4行无法匹配
/// - 第6行 A:B 合并，J 列为公式
pub fn write_template(path: &Path) {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format("#,##0.00");
    let sheet = workbook.add_worksheet();
    sheet.set_name("回填").unwrap();

    sheet.write_string(0, 0, "单位").unwrap();
    sheet.write_string(0, 1, "项目").unwrap();
    sheet.write_string(0, 9, "金额").unwrap();

    sheet.write_string(1, 0, "A单位-本部").unwrap();
    sheet.write_string(1, 1, "基础工资发放").unwrap();
    sheet.write_blank(1, 9, &money).unwrap();
    sheet.write_string(1, 10, "备注A").unwrap();

    sheet.write_string(2, 0, "B 单位").unwrap();
    sheet.write_string(2, 1, "基础性绩效-奖励明细").unwrap();
    sheet.write_string(2, 9, "待填").unwrap();

    sheet.write_string(3, 0, "C单位").unwrap();
    sheet.write_string(3, 1, "其他").unwrap();

    sheet.merge_range(5, 0, 5, 1, "合计", &Format::new()).unwrap();
    sheet.write_formula(5, 9, "=SUM(J2:J4)").unwrap();

    workbook.save(path).unwrap();
}

/// 两张表的模板，第二张为活动表
pub fn write_two_sheet_template(path: &Path) {
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("说明").unwrap();
    notes.write_string(1, 0, "A单位").unwrap();
    notes.write_string(1, 1, "基础工资").unwrap();

    let data = workbook.add_worksheet();
    data.set_name("数据").unwrap();
    data.set_active(true);
    data.write_string(0, 0, "单位").unwrap();
    data.write_string(1, 0, "A单位").unwrap();
    data.write_string(1, 1, "基础工资").unwrap();

    workbook.save(path).unwrap();
}
