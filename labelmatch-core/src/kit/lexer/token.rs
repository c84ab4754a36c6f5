//! Token 类型定义

use std::fmt;

use super::position::Position;

/// Token 种类
///
/// "没有更多 token" 不是一种 kind，由 `Option<Token>` 的 `None` 表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenBrace,
    CloseBrace,
    Comma,
    /// 标签名，或不带引号的标签值
    Ident,
    /// `=`, `!=`, `=~`, `!~`
    Operator,
    /// 带引号的字符串，值中保留引号和转义序列
    Quoted,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::Comma => "Comma",
            TokenKind::Ident => "Ident",
            TokenKind::Operator => "Op",
            TokenKind::Quoted => "Quoted",
        };
        f.write_str(name)
    }
}

/// Token 结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 该 token 覆盖的原始文本（包括引号等定界符）
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) '{}'", self.kind, self.value)
    }
}

/// 诊断用：把可能缺失的 token 描述出来
pub(crate) fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => token.value.clone(),
        None => "end of input".to_string(),
    }
}
