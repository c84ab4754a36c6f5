//! 标签匹配表达式的词法分析器
//!
//! 每次调用 [`Lexer::scan`] 产生一个 token。
//!
//! # 示例
//!
//! ```rust,ignore
//! use labelmatch_core::kit::lexer::Lexer;
//!
//! let mut lexer = Lexer::new("{foo=\"bar\"}");
//! while let Some(token) = lexer.scan()? {
//!     println!("{token}");
//! }
//! ```

use tracing::{debug, trace};

use super::error::{LexErrorKind, LexerError};
use super::position::{Cursor, Position};
use super::token::{Token, TokenKind};

/// 词法分析器状态
///
/// 进入 `Failed` 之后不再扫描，每次调用都返回同一个错误
#[derive(Debug, Clone)]
enum State {
    Scanning,
    Failed(LexerError),
}

/// 词法分析器
pub struct Lexer<'a> {
    input: &'a str,
    /// 当前 token 的起始位置
    start: Cursor,
    /// 读游标
    pos: Cursor,
    /// 最近一次消费的字符宽度（字节），用于回退一个字符
    width: usize,
    state: State,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        trace!(target: "labelmatch::lexer", len = input.len(), "Creating new Lexer");
        Self {
            input,
            start: Cursor::default(),
            pos: Cursor::default(),
            width: 0,
            state: State::Scanning,
        }
    }

    /// 原始输入
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// 已记录的错误（如果有）
    pub fn error(&self) -> Option<&LexerError> {
        match &self.state {
            State::Scanning => None,
            State::Failed(err) => Some(err),
        }
    }

    /// 输入末尾的零宽位置
    pub fn end_position(&self) -> Position {
        let end = self.input.chars().fold(Cursor::default(), |mut cursor, c| {
            cursor.advance(c);
            cursor
        });
        Position::at(end)
    }

    /// 扫描下一个 token
    ///
    /// - `Ok(Some(token))` - 成功扫描到 token
    /// - `Ok(None)` - 输入已结束
    /// - `Err(e)` - 词法错误；之后的每次调用都返回同一个错误
    pub fn scan(&mut self) -> Result<Option<Token>, LexerError> {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }

        match self.scan_token() {
            Ok(Some(token)) => {
                trace!(
                    target: "labelmatch::lexer",
                    kind = %token.kind,
                    value = %token.value,
                    offset_start = token.position.offset_start,
                    offset_end = token.position.offset_end,
                    "Produced token"
                );
                Ok(Some(token))
            }
            Ok(None) => {
                trace!(target: "labelmatch::lexer", "Reached end of input");
                Ok(None)
            }
            Err(err) => {
                debug!(target: "labelmatch::lexer", error = %err, "Lex error encountered");
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// 预读下一个 token，不移动游标
    ///
    /// 预读中遇到的错误会被记录，下一次 `scan` 同样返回它
    pub fn peek(&mut self) -> Result<Option<Token>, LexerError> {
        let (start, pos, width) = (self.start, self.pos, self.width);
        let result = self.scan();
        self.start = start;
        self.pos = pos;
        self.width = width;
        result
    }

    fn scan_token(&mut self) -> Result<Option<Token>, LexerError> {
        self.skip_whitespace();

        let c = match self.next() {
            Some(c) => c,
            None => return Ok(None),
        };

        match c {
            '{' => Ok(Some(self.emit(TokenKind::OpenBrace))),
            '}' => Ok(Some(self.emit(TokenKind::CloseBrace))),
            ',' => Ok(Some(self.emit(TokenKind::Comma))),
            '=' | '!' => {
                self.backup();
                self.scan_operator().map(Some)
            }
            '"' => {
                self.backup();
                self.scan_quoted().map(Some)
            }
            c if is_identifier_start(c) => {
                self.backup();
                self.scan_identifier().map(Some)
            }
            _ => Err(self.error_at(LexErrorKind::InvalidInput)),
        }
    }

    /// 扫描运算符：`=`, `!=`, `=~`, `!~`
    fn scan_operator(&mut self) -> Result<Token, LexerError> {
        if self.accept("!") {
            if !self.accept("=~") {
                return Err(self.expected("=~"));
            }
        } else if self.accept("=") {
            self.accept("~");
        } else {
            return Err(self.expected("!="));
        }
        Ok(self.emit(TokenKind::Operator))
    }

    /// 扫描标识符，遇到第一个非标识符字符时停下（不消费、不报错）
    fn scan_identifier(&mut self) -> Result<Token, LexerError> {
        match self.next() {
            Some(c) if is_identifier_start(c) => {}
            _ => return Err(self.error_at(LexErrorKind::InvalidInput)),
        }
        while let Some(c) = self.next() {
            if !is_identifier_continue(c) {
                self.backup();
                break;
            }
        }
        Ok(self.emit(TokenKind::Ident))
    }

    /// 扫描带引号的字符串，保留引号和转义序列原样
    fn scan_quoted(&mut self) -> Result<Token, LexerError> {
        if !self.accept("\"") {
            return Err(self.expected("\""));
        }
        let mut escaped = false;
        loop {
            match self.next() {
                None => return Err(self.error_at(LexErrorKind::Unterminated { quote: '"' })),
                Some('\\') if !escaped => escaped = true,
                Some('"') if !escaped => break,
                Some(_) => escaped = false,
            }
        }
        Ok(self.emit(TokenKind::Quoted))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.next() {
            if !matches!(c, ' ' | '\t' | '\n') {
                self.backup();
                break;
            }
        }
        self.start = self.pos;
    }

    /// 消费一个字符并记录其宽度；输入结束时返回 None
    fn next(&mut self) -> Option<char> {
        match self.input[self.pos.offset..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos.advance(c);
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// 回退最近消费的一个字符，只能回退一次
    fn backup(&mut self) {
        self.pos.retreat(self.width);
        self.width = 0;
    }

    /// 下一个字符属于 valid 时消费它
    fn accept(&mut self, valid: &str) -> bool {
        match self.next() {
            Some(c) if valid.contains(c) => true,
            Some(_) => {
                self.backup();
                false
            }
            None => false,
        }
    }

    /// 产出 [start, pos) 覆盖的 token，并开始下一个 token
    fn emit(&mut self, kind: TokenKind) -> Token {
        let position = Position::between(self.start, self.pos);
        let token = Token::new(kind, position.slice(self.input), position);
        self.start = self.pos;
        token
    }

    /// [start, pos) 区间上的错误
    fn error_at(&self, kind: LexErrorKind) -> LexerError {
        LexerError::at(kind, Position::between(self.start, self.pos), self.input)
    }

    /// 读游标处的字符不在期望集合内：错误覆盖该字符，输入结束时为零宽
    fn expected(&self, valid: &str) -> LexerError {
        let start = self.pos;
        let mut end = self.pos;
        if let Some(c) = self.input[self.pos.offset..].chars().next() {
            end.advance(c);
        }
        LexerError::at(
            LexErrorKind::Expected {
                expected: valid.to_string(),
            },
            Position::between(start, end),
            self.input,
        )
    }
}

/// 扫描整个输入，遇到第一个错误即返回
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.scan()? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// 标识符起始字符：ASCII 字母或 `_`
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// 标识符延续字符：ASCII 字母、数字、`_` 或 `:`
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}
