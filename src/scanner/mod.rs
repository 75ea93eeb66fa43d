use crate::error::{Result, WageError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 源表格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Office Open XML (.xlsx)
    Xlsx,
    /// 旧版二进制 (.xls)
    Xls,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: SourceKind,
}

/// Office 打开文件时生成的锁文件前缀
const LOCK_FILE_PREFIX: &str = "~$";

pub fn source_kind(path: &Path) -> Option<SourceKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "xlsx" => Some(SourceKind::Xlsx),
        "xls" => Some(SourceKind::Xls),
        _ => None,
    }
}

/// 列出文件夹下（不递归）的工资表
///
/// `exclude` 中的文件名（如文件A本身）会被跳过，避免重复汇总。
pub fn scan_folder(folder: &Path, exclude: &[&str]) -> Result<Vec<SourceFile>> {
    if !folder.is_dir() {
        return Err(WageError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 只看当前目录
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if file_name.starts_with(LOCK_FILE_PREFIX) || exclude.contains(&file_name.as_str()) {
            continue;
        }

        if let Some(kind) = source_kind(path) {
            files.push(SourceFile {
                path: path.to_path_buf(),
                file_name,
                kind,
            });
        }
    }

    // 按文件名排序
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}
