//! 高层 API - 供库用户使用
//!
//! 在核心解析器之上接入全局配置和日志 span。
//!
//! # 使用示例
//! ```
//! use labelmatch::{parse, MatchType};
//!
//! let matchers = parse(r#"{job="api", env!~"dev.*"}"#).unwrap();
//! assert_eq!(matchers.len(), 2);
//! assert_eq!(matchers[1].match_type, MatchType::NotRegexp);
//! ```

use tracing::{debug, span, Level};

use crate::config::{self, ParserConfig};
use labelmatch_core::{DefaultMatcherFactory, Matcher, MatcherFactory, ParseError, Token};

/// 解析表达式
///
/// 全局配置已初始化时使用其中的解析器配置，否则使用默认配置。
///
/// # Errors
/// 词法或语法错误时返回 `ParseError`
pub fn parse(input: &str) -> Result<Vec<Matcher>, ParseError> {
    match config::try_config() {
        Some(cfg) => parse_with_config(input, &cfg.parser),
        None => parse_with_config(input, &ParserConfig::default()),
    }
}

/// 使用显式配置解析表达式
pub fn parse_with_config(input: &str, config: &ParserConfig) -> Result<Vec<Matcher>, ParseError> {
    parse_with_factory(input, DefaultMatcherFactory, config)
}

/// 使用自定义 matcher 工厂解析表达式
pub fn parse_with_factory<F: MatcherFactory>(
    input: &str,
    factory: F,
    config: &ParserConfig,
) -> Result<Vec<F::Matcher>, ParseError> {
    let _span = span!(
        target: "labelmatch::parser",
        Level::DEBUG,
        "parse",
        len = input.len(),
        require_braces = config.require_braces
    )
    .entered();

    let matchers = labelmatch_core::parse_with(input, factory, config)?;
    debug!(target: "labelmatch::parser", count = matchers.len(), "parse completed");
    Ok(matchers)
}

/// 只做词法分析
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let _span = span!(target: "labelmatch::lexer", Level::DEBUG, "tokenize", len = input.len())
        .entered();

    Ok(labelmatch_core::kit::lexer::tokenize(input)?)
}
