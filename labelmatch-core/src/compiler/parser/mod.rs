pub mod error;
pub mod parser;

// 重新导出常用类型
pub use error::{ErrorLocation, ParserError, ParserErrorKind};
pub use parser::Parser;
