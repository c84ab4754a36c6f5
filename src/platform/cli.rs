//! 终端格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文。

use labelmatch_core::ParseError;

/// 错误信息加源码上下文
pub fn format_error(e: &ParseError, source: &str) -> String {
    format!("❌ {}", e.render(source))
}
