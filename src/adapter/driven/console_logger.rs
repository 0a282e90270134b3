use crate::domain::port::{LogLevel, Logger};
use chrono::{DateTime, Utc};

/// ログエントリ
/// 構造化ログの基本構造を定義
/// アダプター層の実装詳細として配置
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub component: String,
}

impl LogEntry {
    /// 新しいログエントリを作成
    pub fn new(level: LogLevel, message: String, component: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            component,
        }
    }

    /// ログエントリを文字列として出力
    pub fn format(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.level.as_str(),
            self.component,
            self.message
        )
    }
}

/// コンソールログ実装
/// 標準出力・標準エラー出力にログを出力する
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, component: &str, message: &str) {
        let entry = LogEntry::new(LogLevel::Debug, message.to_string(), component.to_string());
        println!("{}", entry.format());
    }

    fn info(&self, component: &str, message: &str) {
        let entry = LogEntry::new(LogLevel::Info, message.to_string(), component.to_string());
        println!("{}", entry.format());
    }

    fn warn(&self, component: &str, message: &str) {
        let entry = LogEntry::new(LogLevel::Warning, message.to_string(), component.to_string());
        println!("{}", entry.format());
    }

    fn error(&self, component: &str, message: &str) {
        let entry = LogEntry::new(LogLevel::Error, message.to_string(), component.to_string());
        eprintln!("{}", entry.format());
    }
}
