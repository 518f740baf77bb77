use std::io::Write;
use std::str::FromStr;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::netfield_common_rs::field::{FieldError, FieldResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// trace / debug / info / warn / error / off
    pub level: String,
    pub timestamps: bool,
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".into(), timestamps: true, module_path: true }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> FieldResult<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| FieldError::Config(format!("Invalid log level: {}", self.level)))
    }
}

/// 1行分の整形: `[timestamp] [LEVEL] [module] message`
pub fn format_line(config: &LogConfig, level: log::Level, module: Option<&str>, message: &str) -> String {
    let mut parts = Vec::new();
    if config.timestamps {
        parts.push(format!("[{}]", Local::now().format(TIMESTAMP_FORMAT)));
    }
    parts.push(format!("[{}]", level));
    if config.module_path {
        if let Some(module) = module {
            parts.push(format!("[{}]", module));
        }
    }
    parts.push(message.to_string());
    parts.join(" ")
}

/// 設定から `env_logger::Builder` を組み立てる
///
/// `RUST_LOG` が設定されていればそちらのフィルタを優先する。
pub fn build_logger(config: &LogConfig) -> FieldResult<Builder> {
    let mut builder = Builder::new();
    builder.filter_level(config.level_filter()?);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let line_config = config.clone();
    builder.format(move |buf, record| {
        let line = format_line(&line_config, record.level(), record.module_path(), &record.args().to_string());
        writeln!(buf, "{}", line)
    });
    Ok(builder)
}

/// グローバルロガーを初期化（2回目以降はエラー）
pub fn init_logging(config: &LogConfig) -> FieldResult<()> {
    build_logger(config)?
        .try_init()
        .map_err(|e| FieldError::Config(format!("Failed to initialize logger: {}", e)))
}
