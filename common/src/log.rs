//! 运行日志
//!
//! 引擎本身不打印任何内容，所有诊断信息以 [`LogEvent`] 交给调用方注入的
//! [`RunLog`]。每次运行的日志只属于这次运行。

/// 事件级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

/// 诊断事件
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    FileStarted { file: String },
    FileSkipped { file: String, reason: String },
    SummaryWritten { path: String },
    ValuesCollected { count: usize },
    NoData,
    RowMatched {
        row: u32,
        unit_text: String,
        unit: String,
        project_text: String,
        label: String,
        value: f64,
    },
    RowUnmatched {
        row: u32,
        unit_text: String,
        project_text: String,
    },
    MatchTotal { count: usize },
    TemplateWritten { path: String },
    TemplateFailed { reason: String },
}

impl LogEvent {
    pub fn level(&self) -> LogLevel {
        match self {
            LogEvent::FileSkipped { .. } | LogEvent::NoData | LogEvent::TemplateFailed { .. } => {
                LogLevel::Warn
            }
            LogEvent::RowMatched { .. } | LogEvent::RowUnmatched { .. } => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEvent::FileStarted { file } => write!(f, "处理文件: {}", file),
            LogEvent::FileSkipped { file, reason } => write!(f, "处理文件 {} 出错: {}", file, reason),
            LogEvent::SummaryWritten { path } => write!(f, "汇总结果已保存到: {}", path),
            LogEvent::ValuesCollected { count } => write!(f, "总共收集到 {} 个数值", count),
            LogEvent::NoData => write!(f, "没有找到有效数据"),
            LogEvent::RowMatched { row, unit_text, unit, project_text, label, value } => write!(
                f,
                "匹配成功: 行{} 单位:'{}'⊇'{}', 项目:'{}'⊇'{}', 值:{}",
                row, unit_text, unit, project_text, label, value
            ),
            LogEvent::RowUnmatched { row, unit_text, project_text } => {
                write!(f, "未匹配: 行{} 单位:'{}', 项目:'{}'", row, unit_text, project_text)
            }
            LogEvent::MatchTotal { count } => write!(f, "总共完成 {} 处匹配", count),
            LogEvent::TemplateWritten { path } => write!(f, "已保存更新后的文件B到: {}", path),
            LogEvent::TemplateFailed { reason } => write!(f, "更新文件B出错: {}", reason),
        }
    }
}

/// 日志接收端
pub trait RunLog {
    fn record(&mut self, event: LogEvent);
}

/// 任意闭包都可作为接收端
impl<F: FnMut(&LogEvent)> RunLog for F {
    fn record(&mut self, event: LogEvent) {
        self(&event)
    }
}

/// 收集到内存
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    pub events: Vec<LogEvent>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// 最后 `n` 条（展示层只显示尾部）
    pub fn tail(&self, n: usize) -> &[LogEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }
}

impl RunLog for MemoryLog {
    fn record(&mut self, event: LogEvent) {
        self.events.push(event);
    }
}
