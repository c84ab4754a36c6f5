//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use labelmatch::{parse, MatchType, Matcher, ParseError};

/// 构造期望的 matcher
pub fn matcher(match_type: MatchType, name: &str, value: &str) -> Matcher {
    Matcher::new(match_type, name, value).expect("valid matcher")
}

/// 解析并断言成功
pub fn parse_ok(input: &str) -> Vec<Matcher> {
    match parse(input) {
        Ok(matchers) => matchers,
        Err(e) => panic!("failed to parse {input:?}: {e}"),
    }
}

/// 解析并断言失败
pub fn parse_err(input: &str) -> ParseError {
    match parse(input) {
        Ok(matchers) => panic!("expected {input:?} to fail, got {matchers:?}"),
        Err(e) => e,
    }
}

/// 断言错误信息
pub fn assert_error(input: &str, expected: &str) {
    assert_eq!(parse_err(input).to_string(), expected, "input: {input:?}");
}
