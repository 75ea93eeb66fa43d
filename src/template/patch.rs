//! 工作表 XML 的单元格改写
//!
//! 只改动回填列的 `<c>` 元素：保留样式索引 `s`，去掉类型 `t`、公式及旧值，
//! 写入数值。其他元素按原样输出。

use super::package::{attr_value, xml_err};
use crate::error::{Result, WageError};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;

/// 列号 → 列字母（1 → A，10 → J，27 → AA）
pub fn column_letters(col: u32) -> String {
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// 单元格引用 → (列, 行)，如 `J12` → (10, 12)
pub fn split_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let digits_at = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(digits_at);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let col = letters
        .bytes()
        .try_fold(0u32, |acc, b| acc.checked_mul(26)?.checked_add(u32::from(b - b'A') + 1))?;
    let row = digits.parse().ok()?;
    Some((col, row))
}

/// 正在处理的需回填行
struct PendingRow {
    row: u32,
    value: f64,
    written: bool,
    next_col: u32,
}

struct SheetPatcher {
    writer: Writer<Vec<u8>>,
    remaining: BTreeMap<u32, f64>,
    target_column: u32,
    /// 命名空间前缀（含冒号），新建元素沿用
    prefix: String,
    pending: Option<PendingRow>,
    last_row: u32,
}

fn local_is(e: &BytesStart<'_>, name: &[u8]) -> bool {
    e.local_name().as_ref() == name
}

fn end_is(e: &BytesEnd<'_>, name: &[u8]) -> bool {
    e.local_name().as_ref() == name
}

/// 复制元素并去掉某个属性
fn without_attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<BytesStart<'static>> {
    let mut out = e.to_owned();
    out.clear_attributes();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        if attr.key.as_ref() != key {
            out.push_attribute(attr);
        }
    }
    Ok(out)
}

fn name_prefix(e: &BytesStart<'_>) -> String {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    match name.find(':') {
        Some(i) => name[..=i].to_string(),
        None => String::new(),
    }
}

impl SheetPatcher {
    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_err)
    }

    fn write_value_cell(&mut self, row: u32, value: f64, style: Option<&str>) -> Result<()> {
        let cell_name = format!("{}c", self.prefix);
        let value_name = format!("{}v", self.prefix);
        let reference = format!("{}{}", column_letters(self.target_column), row);
        let text = value.to_string();

        let mut start = BytesStart::new(cell_name.as_str());
        start.push_attribute(("r", reference.as_str()));
        if let Some(s) = style {
            start.push_attribute(("s", s));
        }
        self.write(Event::Start(start))?;
        self.write(Event::Start(BytesStart::new(value_name.as_str())))?;
        self.write(Event::Text(BytesText::new(&text)))?;
        self.write(Event::End(BytesEnd::new(value_name.as_str())))?;
        self.write(Event::End(BytesEnd::new(cell_name.as_str())))
    }

    /// 写出一整行（原表中不存在的行）
    fn write_new_row(&mut self, row: u32, value: f64) -> Result<()> {
        let row_name = format!("{}row", self.prefix);
        let number = row.to_string();
        let mut start = BytesStart::new(row_name.as_str());
        start.push_attribute(("r", number.as_str()));
        self.write(Event::Start(start))?;
        self.write_value_cell(row, value, None)?;
        self.write(Event::End(BytesEnd::new(row_name.as_str())))
    }

    /// 补写行号小于 `limit` 的待回填行；`None` 表示全部补写
    fn flush_rows_before(&mut self, limit: Option<u32>) -> Result<()> {
        while let Some((&row, &value)) = self.remaining.first_key_value() {
            if limit.is_some_and(|l| row >= l) {
                break;
            }
            self.remaining.pop_first();
            self.write_new_row(row, value)?;
        }
        Ok(())
    }

    /// 进入 `<row>`：返回行号，若该行需回填则设为 pending
    fn enter_row(&mut self, e: &BytesStart<'_>) -> Result<Option<f64>> {
        self.prefix = name_prefix(e);
        let row = match attr_value(e, b"r")? {
            Some(r) => r
                .parse()
                .map_err(|_| WageError::Xml(format!("无效的行号: {}", r)))?,
            None => self.last_row + 1,
        };
        self.last_row = row;
        self.flush_rows_before(Some(row))?;

        let value = self.remaining.remove(&row);
        if let Some(value) = value {
            self.pending = Some(PendingRow { row, value, written: false, next_col: 1 });
        }
        Ok(value)
    }

    /// 确定 `<c>` 的列号（缺少 `r` 时按顺序推算）
    fn cell_column(&mut self, e: &BytesStart<'_>) -> Result<u32> {
        let reference = attr_value(e, b"r")?;
        let Some(pending) = self.pending.as_mut() else {
            return Ok(0);
        };
        let col = match reference.as_deref().and_then(split_cell_ref) {
            Some((col, _)) => col,
            None => pending.next_col,
        };
        pending.next_col = col + 1;
        Ok(col)
    }

    /// 处理 pending 行内的 `<c>`。返回 true 表示原单元格已被替换。
    fn handle_cell(&mut self, e: &BytesStart<'_>) -> Result<bool> {
        let col = self.cell_column(e)?;
        let Some((row, value, written)) = self.pending.as_ref().map(|p| (p.row, p.value, p.written)) else {
            return Ok(false);
        };
        if written {
            return Ok(false);
        }

        if col == self.target_column {
            let style = attr_value(e, b"s")?;
            self.write_value_cell(row, value, style.as_deref())?;
            self.mark_written();
            return Ok(true);
        }
        if col > self.target_column {
            self.write_value_cell(row, value, None)?;
            self.mark_written();
        }
        Ok(false)
    }

    fn mark_written(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            pending.written = true;
        }
    }

    /// 离开 `<row>`：行内没有回填列单元格时追加到末尾
    fn leave_row(&mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            if !pending.written {
                self.write_value_cell(pending.row, pending.value, None)?;
            }
        }
        Ok(())
    }
}

/// 改写工作表 XML，把 `values`（行号 → 数值）写入 `target_column` 列
pub fn patch_sheet_xml(xml: &[u8], target_column: u32, values: &BTreeMap<u32, f64>) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut patcher = SheetPatcher {
        writer: Writer::new(Vec::with_capacity(xml.len() + 64 * values.len())),
        remaining: values.clone(),
        target_column,
        prefix: String::new(),
        pending: None,
        last_row: 0,
    };
    // 被替换单元格的子元素嵌套深度
    let mut skip_depth: Option<usize> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(xml_err)?;

        if let Some(depth) = skip_depth {
            skip_depth = match event {
                Event::Start(_) => Some(depth + 1),
                Event::End(_) if depth == 0 => None,
                Event::End(_) => Some(depth - 1),
                Event::Eof => return Err(WageError::Xml("单元格未闭合".into())),
                _ => Some(depth),
            };
            buf.clear();
            continue;
        }

        match event {
            Event::Eof => break,
            Event::Start(e) if local_is(&e, b"row") => {
                if patcher.enter_row(&e)?.is_some() {
                    let stripped = without_attribute(&e, b"spans")?;
                    patcher.write(Event::Start(stripped))?;
                } else {
                    patcher.write(Event::Start(e))?;
                }
            }
            Event::Empty(e) if local_is(&e, b"row") => {
                if patcher.enter_row(&e)?.is_some() {
                    let stripped = without_attribute(&e, b"spans")?;
                    let end = stripped.to_end().into_owned();
                    patcher.write(Event::Start(stripped))?;
                    patcher.leave_row()?;
                    patcher.write(Event::End(end))?;
                } else {
                    patcher.write(Event::Empty(e))?;
                }
            }
            Event::End(e) if end_is(&e, b"row") => {
                patcher.leave_row()?;
                patcher.write(Event::End(e))?;
            }
            Event::Start(e) if local_is(&e, b"c") => {
                if patcher.handle_cell(&e)? {
                    skip_depth = Some(0);
                } else {
                    patcher.write(Event::Start(e))?;
                }
            }
            Event::Empty(e) if local_is(&e, b"c") => {
                if !patcher.handle_cell(&e)? {
                    patcher.write(Event::Empty(e))?;
                }
            }
            Event::Empty(e) if local_is(&e, b"sheetData") => {
                if patcher.remaining.is_empty() {
                    patcher.write(Event::Empty(e))?;
                } else {
                    patcher.prefix = name_prefix(&e);
                    let end = e.to_end().into_owned();
                    patcher.write(Event::Start(e))?;
                    patcher.flush_rows_before(None)?;
                    patcher.write(Event::End(end))?;
                }
            }
            Event::End(e) if end_is(&e, b"sheetData") => {
                patcher.flush_rows_before(None)?;
                patcher.write(Event::End(e))?;
            }
            other => patcher.write(other)?,
        }
        buf.clear();
    }

    Ok(patcher.writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(xml: &str, values: &[(u32, f64)]) -> String {
        let values: BTreeMap<u32, f64> = values.iter().copied().collect();
        String::from_utf8(patch_sheet_xml(xml.as_bytes(), 10, &values).unwrap()).unwrap()
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(10), "J");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(30), "AD");
    }

    #[test]
    fn test_split_cell_ref() {
        assert_eq!(split_cell_ref("J12"), Some((10, 12)));
        assert_eq!(split_cell_ref("AD4"), Some((30, 4)));
        assert_eq!(split_cell_ref("12"), None);
        assert_eq!(split_cell_ref("J"), None);
    }

    #[test]
    fn test_replace_existing_cell_keeps_style() {
        let xml = r#"<sheetData><row r="2" spans="1:11"><c r="A2" t="s"><v>0</v></c><c r="J2" s="3" t="str"><f>SUM(A1)</f><v>x</v></c><c r="K2"><v>9</v></c></row></sheetData>"#;
        let out = patch(xml, &[(2, 150.0)]);
        assert_eq!(
            out,
            r#"<sheetData><row r="2"><c r="A2" t="s"><v>0</v></c><c r="J2" s="3"><v>150</v></c><c r="K2"><v>9</v></c></row></sheetData>"#
        );
    }

    #[test]
    fn test_replace_empty_formatted_cell() {
        let xml = r#"<sheetData><row r="3"><c r="J3" s="7"/></row></sheetData>"#;
        let out = patch(xml, &[(3, 2.5)]);
        assert_eq!(out, r#"<sheetData><row r="3"><c r="J3" s="7"><v>2.5</v></c></row></sheetData>"#);
    }

    #[test]
    fn test_insert_cell_in_column_order() {
        let xml = r#"<sheetData><row r="2"><c r="A2"><v>1</v></c><c r="L2"><v>2</v></c></row></sheetData>"#;
        let out = patch(xml, &[(2, 10.0)]);
        assert_eq!(
            out,
            r#"<sheetData><row r="2"><c r="A2"><v>1</v></c><c r="J2"><v>10</v></c><c r="L2"><v>2</v></c></row></sheetData>"#
        );
    }

    #[test]
    fn test_append_cell_at_row_end() {
        let xml = r#"<sheetData><row r="2"><c r="B2"><v>1</v></c></row><row r="3"/></sheetData>"#;
        let out = patch(xml, &[(2, 1.0), (3, 4.0)]);
        assert_eq!(
            out,
            r#"<sheetData><row r="2"><c r="B2"><v>1</v></c><c r="J2"><v>1</v></c></row><row r="3"><c r="J3"><v>4</v></c></row></sheetData>"#
        );
    }

    #[test]
    fn test_missing_rows_are_created() {
        let xml = r#"<sheetData><row r="4"><c r="A4"><v>1</v></c></row></sheetData>"#;
        let out = patch(xml, &[(2, 1.0), (6, 3.0)]);
        assert_eq!(
            out,
            r#"<sheetData><row r="2"><c r="J2"><v>1</v></c></row><row r="4"><c r="A4"><v>1</v></c></row><row r="6"><c r="J6"><v>3</v></c></row></sheetData>"#
        );
    }

    #[test]
    fn test_untouched_rows_pass_through() {
        let xml = r#"<worksheet><sheetData><row r="1" spans="1:10"><c r="J1" t="s"><v>5</v></c></row></sheetData><mergeCells count="1"><mergeCell ref="A1:B1"/></mergeCells></worksheet>"#;
        assert_eq!(patch(xml, &[]), xml);
    }

    #[test]
    fn test_cells_without_reference() {
        let xml = r#"<sheetData><row r="2"><c><v>1</v></c><c><v>2</v></c></row></sheetData>"#;
        let out = patch(xml, &[(2, 8.0)]);
        assert_eq!(out, r#"<sheetData><row r="2"><c><v>1</v></c><c><v>2</v></c><c r="J2"><v>8</v></c></row></sheetData>"#);
    }

    #[test]
    fn test_prefixed_elements() {
        let xml = r#"<x:sheetData><x:row r="2"><x:c r="A2"><x:v>1</x:v></x:c></x:row></x:sheetData>"#;
        let out = patch(xml, &[(2, 3.0)]);
        assert_eq!(
            out,
            r#"<x:sheetData><x:row r="2"><x:c r="A2"><x:v>1</x:v></x:c><x:c r="J2"><x:v>3</x:v></x:c></x:row></x:sheetData>"#
        );
    }
}
