use std::borrow::Cow;

use super::matcher::MatcherError;

/// 反转义标签值
///
/// 支持 `\n`, `\t`, `\r`, `\\`, `\"`，其他转义序列报错。
/// 不含反斜杠时直接借用原字符串。
pub fn unescape(raw: &str) -> Result<Cow<'_, str>, MatcherError> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => return Err(MatcherError::InvalidEscape(other)),
            None => return Err(MatcherError::UnterminatedEscape),
        }
    }
    Ok(Cow::Owned(out))
}
