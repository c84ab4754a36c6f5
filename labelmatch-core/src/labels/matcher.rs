use std::fmt;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Matcher 构造错误
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    #[error("unterminated escape sequence")]
    UnterminatedEscape,
}

/// 匹配运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `=~`
    Regexp,
    /// `!~`
    NotRegexp,
}

impl MatchType {
    /// 运算符字面量到运算符类型的精确映射
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "=" => Some(MatchType::Equal),
            "!=" => Some(MatchType::NotEqual),
            "=~" => Some(MatchType::Regexp),
            "!~" => Some(MatchType::NotRegexp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Equal => "=",
            MatchType::NotEqual => "!=",
            MatchType::Regexp => "=~",
            MatchType::NotRegexp => "!~",
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, MatchType::Regexp | MatchType::NotRegexp)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个标签匹配条件：(标签名, 运算符, 值)
#[derive(Debug, Clone, Serialize)]
pub struct Matcher {
    pub name: String,
    pub match_type: MatchType,
    pub value: String,
    /// 正则类运算符编译出的锚定正则
    #[serde(skip)]
    re: Option<Regex>,
}

impl Matcher {
    pub fn new(
        match_type: MatchType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, MatcherError> {
        let value = value.into();
        let re = if match_type.is_regex() {
            let pattern = format!("^(?:{value})$");
            let re = Regex::new(&pattern).map_err(|source| MatcherError::InvalidRegex {
                pattern: value.clone(),
                source,
            })?;
            Some(re)
        } else {
            None
        };

        Ok(Self {
            name: name.into(),
            match_type,
            value,
            re,
        })
    }

    /// 判断标签值是否满足该条件
    pub fn matches(&self, s: &str) -> bool {
        match (self.match_type, &self.re) {
            (MatchType::Equal, _) => s == self.value,
            (MatchType::NotEqual, _) => s != self.value,
            (MatchType::Regexp, Some(re)) => re.is_match(s),
            (MatchType::NotRegexp, Some(re)) => !re.is_match(s),
            (MatchType::Regexp | MatchType::NotRegexp, None) => false,
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.match_type == other.match_type && self.value == other.value
    }
}

impl Eq for Matcher {}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:?}", self.name, self.match_type, self.value)
    }
}
