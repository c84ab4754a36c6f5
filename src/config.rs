//! 全局配置系统
//!
//! 提供线程安全的全局配置单例，包含日志级别和解析器配置。
//!
//! # 使用示例
//! ```
//! use labelmatch::config::{Config, LogConfig, init, config};
//! use tracing::Level;
//!
//! let cfg = Config {
//!     log: LogConfig {
//!         global: Level::DEBUG,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! init(cfg);
//! // 之后通过 config() 全局访问
//! assert_eq!(config().log.global, Level::DEBUG);
//! ```

use once_cell::sync::OnceCell;
use tracing::Level;

pub use labelmatch_config::{ParserConfig, Phase};

static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

/// 初始化全局配置（必须在任何操作前调用一次）
///
/// # Panics
/// 如果配置已经初始化，会 panic
pub fn init(config: Config) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// 获取全局配置引用
///
/// # Panics
/// 如果配置未初始化，会 panic
pub fn config() -> &'static Config {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// 已初始化时返回全局配置
pub fn try_config() -> Option<&'static Config> {
    GLOBAL_CONFIG.get()
}

/// 检查配置是否已初始化
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// 全局配置结构
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 日志配置
    pub log: LogConfig,
    /// 解析器配置
    pub parser: ParserConfig,
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 全局默认日志级别
    pub global: Level,
    /// Lexer 日志级别（None 表示使用 global）
    pub lexer: Option<Level>,
    /// Parser 日志级别
    pub parser: Option<Level>,
}

impl LogConfig {
    /// 获取指定阶段的实际日志级别
    ///
    /// 如果该阶段有特定配置则返回特定级别，否则返回全局级别
    pub fn level_for(&self, phase: Phase) -> Level {
        let specific = match phase {
            Phase::Lexer => self.lexer,
            Phase::Parser => self.parser,
        };
        specific.unwrap_or(self.global)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            lexer: None,
            parser: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.log.global, Level::INFO);
        assert!(!cfg.parser.require_braces);
    }

    #[test]
    fn test_log_level_for() {
        let cfg = LogConfig {
            global: Level::WARN,
            lexer: Some(Level::TRACE),
            parser: None,
        };

        assert_eq!(cfg.level_for(Phase::Lexer), Level::TRACE);
        assert_eq!(cfg.level_for(Phase::Parser), Level::WARN);
    }

    #[test]
    fn test_phase_target() {
        assert_eq!(Phase::Lexer.target(), "labelmatch::lexer");
        assert_eq!(Phase::Parser.target(), "labelmatch::parser");
    }
}
