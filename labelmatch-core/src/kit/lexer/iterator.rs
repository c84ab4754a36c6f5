//! 带一个 token 预读的迭代器
//!
//! 词法错误不会被吞掉：`next_token` / `peek` 直接把它返回给调用方。
//! 由于 lexer 的错误是粘性的，之后的每次调用都会再次得到同一个错误。

use super::error::LexerError;
use super::lexer::Lexer;
use super::position::Position;
use super::token::Token;

pub struct TokenIterator<'a> {
    lexer: Lexer<'a>,
    /// 已预读但尚未消费的 token
    peeked: Option<Token>,
}

impl<'a> TokenIterator<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            peeked: None,
        }
    }

    /// 消费下一个 token；`Ok(None)` 表示输入已结束
    pub fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.scan(),
        }
    }

    /// 查看下一个 token 而不消费，重复调用结果相同
    pub fn peek(&mut self) -> Result<Option<&Token>, LexerError> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.scan()?;
        }
        Ok(self.peeked.as_ref())
    }

    pub fn input(&self) -> &'a str {
        self.lexer.input()
    }

    /// 输入末尾的零宽位置，用于 "end of input" 诊断
    pub fn end_position(&self) -> Position {
        self.lexer.end_position()
    }
}
