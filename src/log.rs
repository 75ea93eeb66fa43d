//! tracing 输出的运行日志

use wage_merge_common::{LogEvent, LogLevel, RunLog};

/// 把引擎事件转发给 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl RunLog for TracingLog {
    fn record(&mut self, event: LogEvent) {
        match event.level() {
            LogLevel::Warn => tracing::warn!(target: "wage_merge", "{}", event),
            LogLevel::Info => tracing::info!(target: "wage_merge", "{}", event),
            LogLevel::Debug => tracing::debug!(target: "wage_merge", "{}", event),
        }
    }
}

/// 初始化 tracing。`RUST_LOG` 优先，其次按 `-v` 选择级别。
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wage_merge={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_log_accepts_all_levels() {
        init_tracing(true);
        let mut log = TracingLog;
        log.record(LogEvent::NoData);
        log.record(LogEvent::MatchTotal { count: 1 });
        log.record(LogEvent::RowUnmatched { row: 2, unit_text: "A".into(), project_text: "B".into() });
    }

    #[test]
    fn test_levels() {
        assert_eq!(LogEvent::NoData.level(), LogLevel::Warn);
        assert_eq!(LogEvent::TemplateWritten { path: "b.xlsx".into() }.level(), LogLevel::Info);
    }
}
