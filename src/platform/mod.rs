//! Platform - 平台适配层
//!
//! 所有 IO 副作用都在这里实现：
//! - 终端错误输出

pub mod cli;

// 重导出 CLI 功能
pub use cli::format_error;
