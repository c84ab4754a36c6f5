//! 解析错误
//!
//! 词法错误和语法错误分别保留各自的结构，只在这里汇总成一个类型。
//! 词法错误可以附带解析器当时期望的内容，显示为 `<词法错误>: <期望>`。

use thiserror::Error;

use super::parser::{ParserError, ParserErrorKind};
use crate::kit::lexer::{LexerError, Position};
use labelmatch_config::Phase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 词法分析错误（结构化），以及出错时解析器的期望
    #[error("{error}{}", expectation(.expected))]
    Lexer {
        error: LexerError,
        expected: Option<ParserErrorKind>,
    },

    /// 语法分析错误（结构化）
    #[error("{0}")]
    Parser(#[from] ParserError),
}

fn expectation(expected: &Option<ParserErrorKind>) -> String {
    match expected {
        Some(kind) => format!(": {kind}"),
        None => String::new(),
    }
}

impl From<LexerError> for ParseError {
    fn from(error: LexerError) -> Self {
        ParseError::Lexer {
            error,
            expected: None,
        }
    }
}

impl ParseError {
    /// 带解析器期望的词法错误
    pub fn lexer_expecting(error: LexerError, expected: ParserErrorKind) -> Self {
        ParseError::Lexer {
            error,
            expected: Some(expected),
        }
    }

    /// 出错区间
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexer { error, .. } => error.position,
            ParseError::Parser(e) => e.position(),
        }
    }

    /// 出错阶段
    pub fn phase(&self) -> Phase {
        match self {
            ParseError::Lexer { .. } => Phase::Lexer,
            ParseError::Parser(_) => Phase::Parser,
        }
    }

    /// 词法错误（如果是）
    pub fn lexer_error(&self) -> Option<&LexerError> {
        match self {
            ParseError::Lexer { error, .. } => Some(error),
            ParseError::Parser(_) => None,
        }
    }

    /// 缺少左花括号（只在严格模式或出现多余的 `}` 时产生）
    pub fn is_missing_open_brace(&self) -> bool {
        matches!(self, ParseError::Parser(e) if e.is_missing_open_brace())
    }

    /// 缺少右花括号
    pub fn is_missing_close_brace(&self) -> bool {
        matches!(self, ParseError::Parser(e) if e.is_missing_close_brace())
    }

    /// 带源码上下文的诊断文本：错误信息、出错行、以及指向出错区间的 `^`
    pub fn render(&self, input: &str) -> String {
        let position = self.position();
        let start = floor_boundary(input, position.offset_start);
        let line_start = input[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = input[start..].find('\n').map_or(input.len(), |i| start + i);
        let end = floor_boundary(input, position.offset_end).clamp(start, line_end);

        let line_num = input[..line_start].matches('\n').count() + 1;
        let line = input[line_start..line_end].trim_end_matches('\r');
        let marker_offset = input[line_start..start].chars().count();
        let marker_len = input[start..end].chars().count().max(1);

        let gutter = line_num.to_string();
        let padding = " ".repeat(gutter.len());
        format!(
            "{}\n{padding} |\n{gutter} | {line}\n{padding} | {}{}",
            self,
            " ".repeat(marker_offset),
            "^".repeat(marker_len)
        )
    }
}

/// 不超过 offset 的最近字符边界
fn floor_boundary(input: &str, offset: usize) -> usize {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
