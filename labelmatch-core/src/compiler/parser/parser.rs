//! 标签匹配表达式的递归下降解析器
//!
//! ```text
//! expr         := '{'? matcher_list? ','? '}'?
//! matcher_list := matcher (',' matcher)*
//! matcher      := IDENT operator value
//! operator     := '=' | '!=' | '=~' | '!~'
//! value        := QUOTED | IDENT
//! ```
//!
//! 花括号可以省略；一旦出现左花括号，右花括号就是必需的。

use tracing::{debug, trace};

use super::error::{ParserError, ParserErrorKind};
use crate::compiler::error::ParseError;
use crate::kit::lexer::token::describe;
use crate::kit::lexer::{Lexer, Token, TokenIterator, TokenKind};
use crate::labels::{MatchType, MatcherFactory};
use labelmatch_config::ParserConfig;

type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a, F: MatcherFactory> {
    tokens: TokenIterator<'a>,
    factory: F,
    config: ParserConfig,
    /// 第一个 token 是否为左花括号
    has_open_brace: bool,
}

impl<'a, F: MatcherFactory> Parser<'a, F> {
    pub fn new(input: &'a str, factory: F) -> Self {
        Self::with_config(input, factory, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, factory: F, config: ParserConfig) -> Self {
        Self {
            tokens: TokenIterator::new(Lexer::new(input)),
            factory,
            config,
            has_open_brace: false,
        }
    }

    /// 解析整个表达式
    pub fn parse(&mut self) -> ParseResult<Vec<F::Matcher>> {
        let result = self.parse_expr();
        if let Err(err) = &result {
            debug!(target: "labelmatch::parser", error = %err, "Parse failed");
        }
        result
    }

    fn parse_expr(&mut self) -> ParseResult<Vec<F::Matcher>> {
        if self.peek_kind()? == Some(TokenKind::OpenBrace) {
            self.tokens.next_token()?;
            self.has_open_brace = true;
        } else if self.config.require_braces {
            let token = self.tokens.peek()?.cloned();
            return Err(self.unexpected(ParserErrorKind::MissingOpenBrace, token.as_ref()));
        }

        let mut matchers = Vec::new();
        while !matches!(self.peek_kind()?, None | Some(TokenKind::CloseBrace)) {
            matchers.push(self.parse_matcher()?);
            self.parse_separator()?;
        }

        if self.has_open_brace {
            match self.tokens.next_token()? {
                Some(token) if token.is(TokenKind::CloseBrace) => {}
                token => {
                    return Err(self.unexpected(ParserErrorKind::MissingCloseBrace, token.as_ref()))
                }
            }
        }

        if let Some(token) = self.tokens.next_token()? {
            let kind = if token.is(TokenKind::CloseBrace) && !self.has_open_brace {
                ParserErrorKind::MissingOpenBrace
            } else {
                ParserErrorKind::ExpectedEndOfInput
            };
            return Err(self.unexpected(kind, Some(&token)));
        }

        trace!(
            target: "labelmatch::parser",
            count = matchers.len(),
            braces = self.has_open_brace,
            "Parsed matcher list"
        );
        Ok(matchers)
    }

    /// matcher := IDENT operator value
    fn parse_matcher(&mut self) -> ParseResult<F::Matcher> {
        let name = self.expect(TokenKind::Ident, ParserErrorKind::ExpectedLabelName)?;
        let op = self.expect(TokenKind::Operator, ParserErrorKind::ExpectedOperator)?;
        let match_type = MatchType::from_operator(&op.value)
            .ok_or_else(|| self.unexpected(ParserErrorKind::ExpectedOperator, Some(&op)))?;

        let value = match self.next_expecting(ParserErrorKind::ExpectedLabelValue)? {
            Some(token) if token.is(TokenKind::Quoted) || token.is(TokenKind::Ident) => token,
            token => {
                return Err(self.unexpected(ParserErrorKind::ExpectedLabelValue, token.as_ref()))
            }
        };
        let raw = if value.is(TokenKind::Quoted) {
            strip_quotes(&value.value)
        } else {
            value.value.as_str()
        };

        trace!(
            target: "labelmatch::parser",
            name = %name.value,
            op = %match_type,
            value = raw,
            "Parsed matcher"
        );

        self.factory
            .create(match_type, &name.value, raw)
            .map_err(|cause| {
                let position = name.position.merge(&value.position);
                ParserError::at(
                    ParserErrorKind::MatcherConstruction(cause.to_string()),
                    position,
                    position.slice(self.tokens.input()),
                )
                .into()
            })
    }

    /// matcher 之后：逗号、右花括号或输入结束
    fn parse_separator(&mut self) -> ParseResult<()> {
        let next = self
            .peek_kind()
            .map_err(|e| expecting(e, ParserErrorKind::ExpectedCommaOrCloseBrace))?;
        match next {
            None if self.has_open_brace => Err(self.unexpected(ParserErrorKind::MissingCloseBrace, None)),
            None | Some(TokenKind::CloseBrace) => Ok(()),
            Some(TokenKind::Comma) => {
                self.tokens.next_token()?;
                // 允许尾随逗号
                let after = self
                    .peek_kind()
                    .map_err(|e| expecting(e, ParserErrorKind::ExpectedLabelNameAfterComma))?;
                match after {
                    None | Some(TokenKind::Ident) | Some(TokenKind::CloseBrace) => Ok(()),
                    Some(_) => {
                        let token = self.tokens.peek()?.cloned();
                        Err(self.unexpected(
                            ParserErrorKind::ExpectedLabelNameAfterComma,
                            token.as_ref(),
                        ))
                    }
                }
            }
            Some(_) => {
                let token = self.tokens.peek()?.cloned();
                Err(self.unexpected(ParserErrorKind::ExpectedCommaOrCloseBrace, token.as_ref()))
            }
        }
    }

    fn peek_kind(&mut self) -> ParseResult<Option<TokenKind>> {
        Ok(self.tokens.peek()?.map(|token| token.kind))
    }

    /// 期望并消费指定类型的token，否则返回错误
    fn expect(&mut self, kind: TokenKind, error: ParserErrorKind) -> ParseResult<Token> {
        match self.next_expecting(error.clone())? {
            Some(token) if token.is(kind) => Ok(token),
            token => Err(self.unexpected(error, token.as_ref())),
        }
    }

    /// 消费下一个 token；词法错误附带当前的期望
    fn next_expecting(&mut self, expected: ParserErrorKind) -> ParseResult<Option<Token>> {
        self.tokens
            .next_token()
            .map_err(|e| ParseError::lexer_expecting(e, expected))
    }

    /// 在给定 token 处（或输入末尾）创建错误
    fn unexpected(&self, kind: ParserErrorKind, token: Option<&Token>) -> ParseError {
        debug!(
            target: "labelmatch::parser",
            found = %describe(token),
            expected = %kind,
            "Unexpected token"
        );
        let err = match token {
            Some(token) => ParserError::at(kind, token.position, token.value.clone()),
            None => ParserError::at_end(kind, self.tokens.end_position()),
        };
        err.into()
    }
}

/// 给尚未附带期望的词法错误补上期望
fn expecting(err: ParseError, expected: ParserErrorKind) -> ParseError {
    match err {
        ParseError::Lexer {
            error,
            expected: None,
        } => ParseError::lexer_expecting(error, expected),
        other => other,
    }
}

/// 去掉恰好一个开头和一个结尾的双引号
fn strip_quotes(quoted: &str) -> &str {
    let inner = quoted.strip_prefix('"').unwrap_or(quoted);
    inner.strip_suffix('"').unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parser::ErrorLocation;
    use crate::kit::lexer::LexErrorKind;
    use crate::labels::{DefaultMatcherFactory, Matcher};
    use std::cell::RefCell;

    fn parse(input: &str) -> ParseResult<Vec<Matcher>> {
        Parser::new(input, DefaultMatcherFactory).parse()
    }

    fn parse_strict(input: &str) -> ParseResult<Vec<Matcher>> {
        Parser::with_config(input, DefaultMatcherFactory, ParserConfig::strict()).parse()
    }

    fn parser_error(input: &str) -> ParserError {
        match parse(input).unwrap_err() {
            ParseError::Parser(err) => err,
            other => panic!("expected parser error, got {other:?}"),
        }
    }

    fn matcher(match_type: MatchType, name: &str, value: &str) -> Matcher {
        Matcher::new(match_type, name, value).unwrap()
    }

    /// 记录收到的原始参数，不做任何转换
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(MatchType, String, String)>>,
    }

    impl MatcherFactory for Recorder {
        type Matcher = (MatchType, String, String);
        type Error = String;

        fn create(
            &self,
            match_type: MatchType,
            name: &str,
            value: &str,
        ) -> Result<Self::Matcher, String> {
            let call = (match_type, name.to_string(), value.to_string());
            self.calls.borrow_mut().push(call.clone());
            Ok(call)
        }
    }

    struct Rejecting;

    impl MatcherFactory for Rejecting {
        type Matcher = ();
        type Error = String;

        fn create(&self, _: MatchType, name: &str, _: &str) -> Result<(), String> {
            Err(format!("label {name} is not allowed"))
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse("{}").unwrap(), vec![]);
        assert_eq!(parse("  { }  ").unwrap(), vec![]);
    }

    #[test]
    fn test_single_matcher() {
        assert_eq!(
            parse("{foo=\"bar\"}").unwrap(),
            vec![matcher(MatchType::Equal, "foo", "bar")]
        );
    }

    #[test]
    fn test_without_braces() {
        assert_eq!(
            parse("foo=\"bar\",baz!=qux").unwrap(),
            vec![
                matcher(MatchType::Equal, "foo", "bar"),
                matcher(MatchType::NotEqual, "baz", "qux"),
            ]
        );
    }

    #[test]
    fn test_all_operators_in_order() {
        let matchers = parse("{a=\"1\", b!=\"2\", c=~\"3\", d!~\"4\"}").unwrap();
        let ops: Vec<_> = matchers.iter().map(|m| m.match_type).collect();
        assert_eq!(
            ops,
            vec![
                MatchType::Equal,
                MatchType::NotEqual,
                MatchType::Regexp,
                MatchType::NotRegexp,
            ]
        );
        let names: Vec<_> = matchers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(parse("{foo=bar,}").unwrap().len(), 1);
        assert_eq!(parse("foo=bar,").unwrap().len(), 1);
    }

    #[test]
    fn test_raw_value_reaches_factory() {
        let recorder = Recorder::default();
        let result = Parser::new(r#"{foo="b\"a\\r"}"#, &recorder).parse().unwrap();
        assert_eq!(
            result,
            vec![(MatchType::Equal, "foo".to_string(), r#"b\"a\\r"#.to_string())]
        );
        assert_eq!(recorder.calls.borrow().len(), 1);
    }

    #[test]
    fn test_unquoted_value_passed_verbatim() {
        let recorder = Recorder::default();
        Parser::new("job=api:v1", &recorder).parse().unwrap();
        assert_eq!(recorder.calls.borrow()[0].2, "api:v1");
    }

    #[test]
    fn test_missing_close_brace() {
        let err = parser_error("{foo=\"bar\"");
        assert!(err.is_missing_close_brace());
        assert_eq!(err.location, ErrorLocation::EndOfInput(err.position()));
        assert_eq!(err.to_string(), "10:10: end of input: expected close brace");

        assert!(parser_error("{").is_missing_close_brace());
        assert!(parser_error("{foo=bar,").is_missing_close_brace());
    }

    #[test]
    fn test_stray_close_brace() {
        let err = parser_error("foo=\"bar\"}");
        assert!(err.is_missing_open_brace());
        assert_eq!(err.to_string(), "9:10: }: expected opening brace");

        assert!(parser_error("}").is_missing_open_brace());
    }

    #[test]
    fn test_strict_requires_open_brace() {
        let err = parse_strict("foo=\"bar\"").unwrap_err();
        assert!(err.is_missing_open_brace());
        assert_eq!(err.to_string(), "0:3: foo: expected opening brace");

        let err = parse_strict("").unwrap_err();
        assert!(err.is_missing_open_brace());
        assert_eq!(parse_strict("{foo=\"bar\"}").unwrap().len(), 1);
    }

    #[test]
    fn test_expected_label_name() {
        let err = parser_error("{=\"bar\"}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelName);
        assert_eq!(err.to_string(), "1:2: =: expected a label name");

        let err = parser_error("{\"foo\"=\"bar\"}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelName);
    }

    #[test]
    fn test_expected_operator() {
        let err = parser_error("{foo\"bar\"}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedOperator);
        assert_eq!(
            err.to_string(),
            "4:9: \"bar\": expected an operator such as '=', '!=', '=~' or '!~'"
        );

        let err = parser_error("foo");
        assert_eq!(err.kind, ParserErrorKind::ExpectedOperator);
        assert!(matches!(err.location, ErrorLocation::EndOfInput(_)));
    }

    #[test]
    fn test_expected_label_value() {
        let err = parser_error("{foo=}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelValue);
        assert_eq!(err.to_string(), "5:6: }: expected a label value");

        let err = parser_error("{foo=,}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelValue);
    }

    #[test]
    fn test_expected_comma_or_close_brace() {
        let err = parser_error("{foo=\"bar\" baz=\"qux\"}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedCommaOrCloseBrace);
        assert_eq!(err.to_string(), "11:14: baz: expected a comma or close brace");
    }

    #[test]
    fn test_comma_must_be_followed_by_label_name() {
        let err = parser_error("{foo=\"bar\",,}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelNameAfterComma);
        assert_eq!(err.to_string(), "11:12: ,: expected a label name after comma");

        let err = parser_error("foo=bar,=");
        assert_eq!(err.kind, ParserErrorKind::ExpectedLabelNameAfterComma);
    }

    #[test]
    fn test_trailing_input() {
        let err = parser_error("{foo=\"bar\"} baz");
        assert_eq!(err.kind, ParserErrorKind::ExpectedEndOfInput);
        assert_eq!(err.to_string(), "12:15: baz: expected end of input");

        // 已经有左花括号，多出来的右花括号只是多余输入
        let err = parser_error("{}}");
        assert_eq!(err.kind, ParserErrorKind::ExpectedEndOfInput);
    }

    #[test]
    fn test_matcher_construction_error() {
        let err = parser_error("{foo=~\"(\"}");
        match &err.kind {
            ParserErrorKind::MatcherConstruction(cause) => {
                assert!(cause.starts_with("invalid regular expression '('"))
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(err
            .to_string()
            .starts_with("1:9: foo=~\"(\": failed to create matcher: "));
    }

    #[test]
    fn test_custom_factory_error() {
        let err = Parser::new("{ job = \"api\" }", Rejecting).parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "2:13: job = \"api\": failed to create matcher: label job is not allowed"
        );
    }

    #[test]
    fn test_lexer_error_is_forwarded() {
        let err = parse("{foo=\"bar}").unwrap_err();
        match err {
            ParseError::Lexer { error, expected } => {
                assert_eq!(error.kind, LexErrorKind::Unterminated { quote: '"' });
                assert_eq!(expected, Some(ParserErrorKind::ExpectedLabelValue));
            }
            other => panic!("expected lexer error, got {other:?}"),
        }

        let err = parse("{foo!bar}").unwrap_err();
        assert!(matches!(err, ParseError::Lexer { .. }));
    }

    #[test]
    fn test_lexer_error_carries_expectation() {
        let err = parse("{foo=:\"bar\"}").unwrap_err();
        assert_eq!(err.to_string(), "5:6: :: invalid input: expected a label value");

        let err = parse("{foo%=\"bar\"}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "4:5: %: invalid input: expected an operator such as '=', '!=', '=~' or '!~'"
        );

        let err = parse("{%}").unwrap_err();
        assert_eq!(err.to_string(), "1:2: %: invalid input");

        let err = parse("foo=bar$").unwrap_err();
        assert_eq!(
            err.to_string(),
            "7:8: $: invalid input: expected a comma or close brace"
        );

        let err = parse("foo=bar,$").unwrap_err();
        assert_eq!(
            err.to_string(),
            "8:9: $: invalid input: expected a label name after comma"
        );
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"bar\""), "bar");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\"\"\"\""), "\"\"");
    }
}
