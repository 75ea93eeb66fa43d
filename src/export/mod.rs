pub mod excel;

use crate::config::Config;
use std::path::{Path, PathBuf};

/// 文件A输出路径：指定目录优先，否则放在源文件夹
pub fn summary_output_path(config: &Config, folder: &Path, output_dir: Option<&Path>) -> PathBuf {
    output_dir
        .unwrap_or(folder)
        .join(&config.summary_file_name)
}

/// 回填后的文件B：`updated_` + 原文件名，默认与模板同目录
pub fn updated_template_path(config: &Config, template: &Path, output_dir: Option<&Path>) -> PathBuf {
    let parent = template.parent().unwrap_or_else(|| Path::new("."));
    let file_name = template
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "模板.xlsx".to_string());

    output_dir
        .unwrap_or(parent)
        .join(format!("{}{}", config.updated_prefix, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_output_path() {
        let config = Config::default();
        assert_eq!(
            summary_output_path(&config, Path::new("/data/in"), None),
            PathBuf::from("/data/in/文件A_汇总结果.xlsx")
        );
        assert_eq!(
            summary_output_path(&config, Path::new("/data/in"), Some(Path::new("/out"))),
            PathBuf::from("/out/文件A_汇总结果.xlsx")
        );
    }

    #[test]
    fn test_updated_template_path() {
        let config = Config::default();
        assert_eq!(
            updated_template_path(&config, Path::new("/data/模板B.xlsx"), None),
            PathBuf::from("/data/updated_模板B.xlsx")
        );
        assert_eq!(
            updated_template_path(&config, Path::new("b.xlsx"), Some(Path::new("/out"))),
            PathBuf::from("/out/updated_b.xlsx")
        );
    }
}
