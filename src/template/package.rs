//! xlsx 包操作
//!
//! 文件B需要保留原有格式，所以不经表格库重写，而是直接改写包内对应工作表的 XML，
//! 其余部件原样复制。

use crate::error::{Result, WageError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// 工作表名与其 XML 部件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPart {
    pub name: String,
    pub path: String,
}

pub(crate) fn xml_err(err: impl std::fmt::Display) -> WageError {
    WageError::Xml(err.to_string())
}

pub fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(name)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// 按本地名取属性值（忽略命名空间前缀）
pub(crate) fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        if attr.key.local_name().as_ref() == local {
            let raw = String::from_utf8_lossy(&attr.value);
            let value = quick_xml::escape::unescape(&raw).map_err(xml_err)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// workbook.xml：工作表 (名称, 关系ID) 列表与活动页签序号
fn parse_workbook(xml: &[u8]) -> Result<(Vec<(String, String)>, usize)> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();
    let mut active: Option<usize> = None;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"sheet" => {
                    let name = attr_value(&e, b"name")?.unwrap_or_default();
                    let rel_id = attr_value(&e, b"id")?.unwrap_or_default();
                    sheets.push((name, rel_id));
                }
                b"workbookView" if active.is_none() => {
                    active = attr_value(&e, b"activeTab")?.and_then(|v| v.parse().ok());
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((sheets, active.unwrap_or(0)))
}

/// workbook.xml.rels：关系ID → 目标路径
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id")?, attr_value(&e, b"Target")?) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// 关系目标相对 `xl/`，以 `/` 开头时为包内绝对路径
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// 定位活动工作表（打开文件时显示的那张，默认第一张）
pub fn locate_active_sheet<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<SheetPart> {
    let (sheets, active) = parse_workbook(&read_part(archive, WORKBOOK_PART)?)?;
    let relationships = parse_relationships(&read_part(archive, WORKBOOK_RELS_PART)?)?;

    let (name, rel_id) = sheets
        .get(active)
        .or_else(|| sheets.first())
        .cloned()
        .ok_or_else(|| WageError::SheetNotFound("workbook.xml 中没有工作表".into()))?;

    let target = relationships
        .get(&rel_id)
        .ok_or_else(|| WageError::SheetNotFound(format!("{} ({})", name, rel_id)))?;

    Ok(SheetPart { name, path: resolve_target(target) })
}

/// 复制整个包，只替换 `part` 的内容
pub fn rewrite_package<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
    replacement: &[u8],
) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        let options = SimpleFileOptions::default().compression_method(entry.compression());

        if entry.is_dir() {
            writer.add_directory(name, options)?;
            continue;
        }

        writer.start_file(name.as_str(), options)?;
        if name == part {
            writer.write_all(replacement)?;
        } else {
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            writer.write_all(&data)?;
        }
    }

    Ok(writer.finish()?.into_inner())
}
