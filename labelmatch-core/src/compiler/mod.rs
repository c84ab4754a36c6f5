pub mod error;
pub mod parser;

pub use error::ParseError;
pub use parser::{ErrorLocation, Parser, ParserError, ParserErrorKind};

use crate::labels::{DefaultMatcherFactory, Matcher, MatcherFactory};
use labelmatch_config::ParserConfig;

/// 使用默认配置和默认 matcher 实现解析表达式
pub fn parse(input: &str) -> Result<Vec<Matcher>, ParseError> {
    parse_with(input, DefaultMatcherFactory, &ParserConfig::default())
}

/// 使用指定的 matcher 工厂和配置解析表达式
pub fn parse_with<F: MatcherFactory>(
    input: &str,
    factory: F,
    config: &ParserConfig,
) -> Result<Vec<F::Matcher>, ParseError> {
    Parser::with_config(input, factory, config.clone()).parse()
}
