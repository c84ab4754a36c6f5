//! Labelmatch Core - 标签匹配表达式的核心实现（纯逻辑，无 IO）
//!
//! 包含词法分析器、token 迭代器、语法分析器，以及默认的 matcher 实现。
//! 只操作内存中的字符串，不做任何 IO 或终端输出。
//!
//! 配置通过参数显式传入，不依赖全局状态。

pub mod compiler;
pub mod kit;
pub mod labels;

// Re-export common types
pub use compiler::{
    parse, parse_with, ErrorLocation, ParseError, Parser, ParserError, ParserErrorKind,
};
pub use kit::lexer::{LexErrorKind, Lexer, LexerError, Position, Token, TokenIterator, TokenKind};
pub use labels::{DefaultMatcherFactory, MatchType, Matcher, MatcherError, MatcherFactory};

// Re-export config types from labelmatch-config
pub use labelmatch_config::{ParserConfig, Phase};
