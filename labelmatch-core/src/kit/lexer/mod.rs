//! 标签匹配表达式的词法分析
//!
//! - 按码点扫描，同时追踪字节偏移和列号
//! - 错误是粘性的：第一次出错后不再前进
//! - `TokenIterator` 在其上提供一个 token 的预读

pub mod error;
pub mod iterator;
pub mod lexer;
pub mod position;
pub mod token;

pub use error::{LexErrorKind, LexerError};
pub use iterator::TokenIterator;
pub use lexer::{tokenize, Lexer};
pub use position::Position;
pub use token::{Token, TokenKind};
