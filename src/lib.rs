//! Labelmatch - label matcher expressions
//!
//! 解析形如 `{job="api", env!~"dev.*"}` 的标签匹配表达式。
//!
//! # Architecture
//!
//! ```text
//! labelmatch-config/  - 纯配置数据
//! labelmatch-core/    - lexer、token 迭代器、parser、默认 matcher（无 IO）
//! src/
//! ├── api.rs       - 对外接口（接入全局配置）
//! ├── config.rs    - 全局配置单例
//! ├── logger.rs    - tracing subscriber 初始化
//! └── platform/    - 终端输出
//! ```
//!
//! # Quick Start
//!
//! ```
//! use labelmatch::parse;
//!
//! let matchers = parse(r#"{job="api", env!~"dev.*"}"#).unwrap();
//! assert!(matchers[0].matches("api"));
//! assert!(matchers[1].matches("prod"));
//! ```

// API 层（对外接口）
pub mod api;

pub mod config;
pub mod logger;

// 平台适配层（终端格式化）
pub mod platform;

// 重导出常用类型
pub use api::{parse, parse_with_config, parse_with_factory, tokenize};
pub use config::{config, Config, LogConfig, ParserConfig, Phase};
pub use labelmatch_core::{
    DefaultMatcherFactory, ErrorLocation, LexErrorKind, LexerError, MatchType, Matcher,
    MatcherError, MatcherFactory, ParseError, ParserError, ParserErrorKind, Position, Token,
    TokenKind,
};
pub use logger::{init_logger, LogFormat};

/// 初始化（使用前先调用）
///
/// 只初始化配置，不初始化日志系统。
///
/// # Example
/// ```ignore
/// use labelmatch::{init, Config};
///
/// init(Config::default());
/// ```
pub fn init(config: Config) {
    config::init(config);
}

/// 初始化配置和日志系统
///
/// # Example
/// ```ignore
/// use labelmatch::{init_with_logger, Config, LogFormat};
///
/// init_with_logger(Config::default(), LogFormat::Compact);
/// ```
pub fn init_with_logger(config: Config, format: LogFormat) {
    config::init(config);
    logger::init_with_format(format);
}
