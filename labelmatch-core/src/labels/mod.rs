//! 默认的 matcher 实现
//!
//! 解析器只通过 [`MatcherFactory`] 请求构造 matcher，从不查看其内部。
//! 这里提供默认实现：反转义标签值，正则类运算符编译为锚定的正则表达式。

mod matcher;
mod unescape;

pub use matcher::{MatchType, Matcher, MatcherError};
pub use unescape::unescape;

/// 构造 matcher 的能力
///
/// `value` 是原始文本：带引号的值只去掉了首尾引号，转义序列原样保留
pub trait MatcherFactory {
    type Matcher;
    type Error: std::fmt::Display;

    fn create(
        &self,
        match_type: MatchType,
        name: &str,
        value: &str,
    ) -> Result<Self::Matcher, Self::Error>;
}

impl<F: MatcherFactory + ?Sized> MatcherFactory for &F {
    type Matcher = F::Matcher;
    type Error = F::Error;

    fn create(
        &self,
        match_type: MatchType,
        name: &str,
        value: &str,
    ) -> Result<Self::Matcher, Self::Error> {
        (**self).create(match_type, name, value)
    }
}

/// 默认工厂：先反转义，再构造 [`Matcher`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcherFactory;

impl MatcherFactory for DefaultMatcherFactory {
    type Matcher = Matcher;
    type Error = MatcherError;

    fn create(&self, match_type: MatchType, name: &str, value: &str) -> Result<Matcher, MatcherError> {
        let value = unescape(value)?;
        Matcher::new(match_type, name, value)
    }
}
