//! 日志系统初始化
//!
//! 基于 `tracing` 和 `tracing-subscriber` 实现分阶段日志控制。
//!
//! # 使用示例
//! ```ignore
//! use labelmatch::config::{Config, init};
//! use labelmatch::logger::init_logger;
//!
//! init(Config::default());
//! init_logger();
//! ```

use std::io;
use std::path::Path;

use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use crate::config::{self, LogConfig, Phase};

/// 日志输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    #[default]
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 初始化日志系统
///
/// 必须在 `config::init()` 之后调用。
/// 根据配置中的日志级别设置各阶段的过滤。
pub fn init_logger() {
    init_with_format(LogFormat::default());
}

/// 使用指定格式初始化日志系统
pub fn init_with_format(format: LogFormat) {
    init_with_file(format, None::<&Path>);
}

/// 使用文件输出初始化日志系统
///
/// # Arguments
/// * `format` - 日志格式
/// * `file` - 日志文件路径，None 表示只输出到控制台
///
/// # Panics
/// 配置未初始化、日志文件无法打开，或全局 subscriber 已设置时 panic
pub fn init_with_file<P: AsRef<Path>>(format: LogFormat, file: Option<P>) {
    if !config::is_initialized() {
        panic!("Config must be initialized before logger");
    }

    let targets = targets(&config::config().log);

    // 如果指定了文件，同时输出到控制台和文件
    if let Some(path) = file {
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open log file");

        let stdout_layer = create_format_layer(format, io::stdout).with_filter(targets.clone());
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(move || file_handle.try_clone().expect("Failed to clone file handle"))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        let stdout_layer = create_format_layer(format, io::stdout).with_filter(targets);
        tracing_subscriber::registry().with(stdout_layer).init();
    }
}

/// 各阶段的目标过滤器
pub fn targets(cfg: &LogConfig) -> Targets {
    Targets::new()
        .with_default(cfg.global)
        .with_target(Phase::Lexer.target(), cfg.level_for(Phase::Lexer))
        .with_target(Phase::Parser.target(), cfg.level_for(Phase::Parser))
}

/// 根据格式创建 formatter layer
fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}

/// 为当前测试初始化简单日志（仅打印到控制台）
#[cfg(test)]
pub fn init_test_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
