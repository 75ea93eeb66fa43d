use crate::error::{Result, WageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wage_merge_common::{SourceLayout, TemplateLayout};

/// 文件A默认文件名
pub const SUMMARY_FILE_NAME: &str = "文件A_汇总结果.xlsx";

/// 回填后文件B的文件名前缀
pub const UPDATED_PREFIX: &str = "updated_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 源工资表版式
    pub source: SourceLayout,
    /// 模板文件B版式
    pub template: TemplateLayout,
    pub summary_file_name: String,
    pub updated_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceLayout::default(),
            template: TemplateLayout::default(),
            summary_file_name: SUMMARY_FILE_NAME.into(),
            updated_prefix: UPDATED_PREFIX.into(),
        }
    }
}

impl Config {
    /// 读取配置。指定路径时该文件必须存在；否则读取用户目录下的配置，没有则用默认值。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(WageError::FileNotFound(path.display().to_string()));
            }
            return Self::load_from(path);
        }

        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WageError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("wage-merge").join("config.json"))
    }

    /// 列号均为 1 起始；工资列范围不能倒置
    fn validate(&self) -> Result<()> {
        let s = &self.source;
        if s.header_row == 0 || s.budget_unit_column == 0 || s.wage_first_column == 0 {
            return Err(WageError::Config("行号、列号从 1 开始".into()));
        }
        if s.wage_first_column > s.wage_last_column {
            return Err(WageError::Config(format!(
                "工资列范围无效: {}..{}",
                s.wage_first_column, s.wage_last_column
            )));
        }
        let t = &self.template;
        if t.unit_column == 0 || t.project_column == 0 || t.target_column == 0 {
            return Err(WageError::Config("行号、列号从 1 开始".into()));
        }
        if self.summary_file_name.trim().is_empty() {
            return Err(WageError::Config("文件A文件名为空".into()));
        }
        Ok(())
    }
}
