use std::fmt;

use crate::kit::lexer::Position;

/// 语法错误，包含位置信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// 错误类型
    pub kind: ParserErrorKind,
    /// 错误发生的位置
    pub location: ErrorLocation,
}

/// 错误位置信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorLocation {
    /// 某个 token（或一段输入）处，附带其原始文本
    Token { position: Position, text: String },
    /// 输入末尾
    EndOfInput(Position),
}

/// 语法错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    /// 缺少左花括号
    MissingOpenBrace,
    /// 缺少右花括号
    MissingCloseBrace,
    /// 期望标签名
    ExpectedLabelName,
    /// 期望运算符
    ExpectedOperator,
    /// 期望标签值
    ExpectedLabelValue,
    /// matcher 之后需要逗号或右花括号
    ExpectedCommaOrCloseBrace,
    /// 逗号之后需要标签名
    ExpectedLabelNameAfterComma,
    /// 多余的输入
    ExpectedEndOfInput,
    /// matcher 构造失败
    MatcherConstruction(String),
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserErrorKind::MissingOpenBrace => f.write_str("expected opening brace"),
            ParserErrorKind::MissingCloseBrace => f.write_str("expected close brace"),
            ParserErrorKind::ExpectedLabelName => f.write_str("expected a label name"),
            ParserErrorKind::ExpectedOperator => {
                f.write_str("expected an operator such as '=', '!=', '=~' or '!~'")
            }
            ParserErrorKind::ExpectedLabelValue => f.write_str("expected a label value"),
            ParserErrorKind::ExpectedCommaOrCloseBrace => {
                f.write_str("expected a comma or close brace")
            }
            ParserErrorKind::ExpectedLabelNameAfterComma => {
                f.write_str("expected a label name after comma")
            }
            ParserErrorKind::ExpectedEndOfInput => f.write_str("expected end of input"),
            ParserErrorKind::MatcherConstruction(cause) => {
                write!(f, "failed to create matcher: {cause}")
            }
        }
    }
}

impl ParserError {
    pub fn new(kind: ParserErrorKind, location: ErrorLocation) -> Self {
        Self { kind, location }
    }

    /// 在某个 token 处创建错误
    pub fn at(kind: ParserErrorKind, position: Position, text: impl Into<String>) -> Self {
        Self::new(
            kind,
            ErrorLocation::Token {
                position,
                text: text.into(),
            },
        )
    }

    /// 在输入末尾创建错误
    pub fn at_end(kind: ParserErrorKind, position: Position) -> Self {
        Self::new(kind, ErrorLocation::EndOfInput(position))
    }

    pub fn position(&self) -> Position {
        match &self.location {
            ErrorLocation::Token { position, .. } | ErrorLocation::EndOfInput(position) => {
                *position
            }
        }
    }

    pub fn is_missing_open_brace(&self) -> bool {
        self.kind == ParserErrorKind::MissingOpenBrace
    }

    pub fn is_missing_close_brace(&self) -> bool {
        self.kind == ParserErrorKind::MissingCloseBrace
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        let text = match &self.location {
            ErrorLocation::Token { text, .. } => text.as_str(),
            ErrorLocation::EndOfInput(_) => "end of input",
        };
        write!(
            f,
            "{}:{}: {}: {}",
            position.offset_start, position.offset_end, text, self.kind
        )
    }
}

impl std::error::Error for ParserError {}
