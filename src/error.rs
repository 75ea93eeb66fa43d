use thiserror::Error;

#[derive(Error, Debug)]
pub enum WageError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件夹不存在: {0}")]
    FolderNotFound(String),

    #[error("不支持的文件格式: {0}")]
    UnsupportedFormat(String),

    #[error("表格读取错误: {0}")]
    Spreadsheet(String),

    #[error("工作表不存在: {0}")]
    SheetNotFound(String),

    #[error("{0}")]
    Engine(#[from] wage_merge_common::Error),

    #[error("文件A生成错误: {0}")]
    SummaryWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("xlsx 包读写错误: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("XML 解析错误: {0}")]
    Xml(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::XlsxError> for WageError {
    fn from(err: calamine::XlsxError) -> Self {
        WageError::Spreadsheet(err.to_string())
    }
}

impl From<calamine::Error> for WageError {
    fn from(err: calamine::Error) -> Self {
        WageError::Spreadsheet(err.to_string())
    }
}

impl From<quick_xml::Error> for WageError {
    fn from(err: quick_xml::Error) -> Self {
        WageError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WageError>;
