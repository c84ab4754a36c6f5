//! Lexer 错误类型
//!
//! 提供结构化的词法错误信息，包含错误类型、位置和出错的输入片段。

use std::fmt;

use super::position::Position;

/// 词法错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// 下一个字符必须属于给定集合，但不是（或输入已结束）
    Expected { expected: String },
    /// 当前字符不能开始或延续任何 token
    InvalidInput,
    /// 引号字符串没有闭合
    Unterminated { quote: char },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::Expected { expected } => write!(f, "expected one of '{expected}'"),
            LexErrorKind::InvalidInput => f.write_str("invalid input"),
            LexErrorKind::Unterminated { quote } => write!(f, "missing end {quote}"),
        }
    }
}

/// 词法错误，包含结构化信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    /// 错误类型
    pub kind: LexErrorKind,
    /// 错误覆盖的区间
    pub position: Position,
    /// 区间对应的原始输入
    pub fragment: String,
}

impl LexerError {
    /// 在指定区间创建错误，片段从 input 中截取
    pub fn at(kind: LexErrorKind, position: Position, input: &str) -> Self {
        Self {
            kind,
            fragment: position.slice(input).to_string(),
            position,
        }
    }

    /// 起始字节偏移
    pub fn offset(&self) -> usize {
        self.position.offset_start
    }

    /// 起始列（0-based，码点计数）
    pub fn column(&self) -> usize {
        self.position.column_start
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fragment = if self.fragment.is_empty() {
            "end of input"
        } else {
            self.fragment.as_str()
        };
        write!(
            f,
            "{}:{}: {}: {}",
            self.position.offset_start, self.position.offset_end, fragment, self.kind
        )
    }
}

impl std::error::Error for LexerError {}
