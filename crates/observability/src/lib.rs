//! # Observability
//!
//! Tracing 初始化。
//!
//! ## 功能
//!
//! - Pretty / Compact / JSON 三种输出格式
//! - `RUST_LOG` 优先，其次为命令行给定的默认级别
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{init_logging, LoggingConfig, LogFormat};
//!
//! init_logging(&LoggingConfig {
//!     log_format: LogFormat::Compact,
//!     default_log_level: "debug".into(),
//! })?;
//! ```

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    Pretty,
    /// 紧凑单行格式
    #[default]
    Compact,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// 默认日志级别（`RUST_LOG` 未设置时生效）
    pub default_log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            default_log_level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// 由 `-v` 次数与 `-q` 推导默认级别
    pub fn from_verbosity(log_format: LogFormat, verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            "warn"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };
        Self {
            log_format,
            default_log_level: level.to_string(),
        }
    }
}

/// 初始化 tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(log_format = ?config.log_format, "Logging initialized");
    Ok(())
}
