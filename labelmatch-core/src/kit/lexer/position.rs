//! 源代码位置追踪
//!
//! 同时维护两套坐标：
//! - offset: 字节偏移，0-based，UTF-8编码，用于切片原始输入
//! - column: 列号，0-based，Unicode码点计数，用于错误显示

/// 扫描游标上的一个点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// 字节偏移
    pub offset: usize,
    /// 码点计数
    pub column: usize,
}

impl Cursor {
    /// 前进一个字符
    ///
    /// 列号总是加 1，字节偏移加上该字符的 UTF-8 长度（1-4）
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        self.column += 1;
    }

    /// 回退一个已消费的字符（宽度由调用方记录）
    pub fn retreat(&mut self, width: usize) {
        if width > 0 {
            self.offset -= width;
            self.column -= 1;
        }
    }
}

/// Token 或错误在输入中的区间
///
/// 不变量：`offset_start <= offset_end` 且 `column_start <= column_end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// 起始字节偏移
    pub offset_start: usize,
    /// 结束字节偏移（不含）
    pub offset_end: usize,
    /// 起始列
    pub column_start: usize,
    /// 结束列（不含）
    pub column_end: usize,
}

impl Position {
    /// 由两个游标构造区间
    pub fn between(start: Cursor, end: Cursor) -> Self {
        Self {
            offset_start: start.offset,
            offset_end: end.offset,
            column_start: start.column,
            column_end: end.column,
        }
    }

    /// 零宽区间（用于输入末尾等位置）
    pub fn at(cursor: Cursor) -> Self {
        Self::between(cursor, cursor)
    }

    /// 合并两个区间：从 self 的起点到 other 的终点
    pub fn merge(&self, other: &Position) -> Self {
        Self {
            offset_start: self.offset_start,
            offset_end: other.offset_end,
            column_start: self.column_start,
            column_end: other.column_end,
        }
    }

    /// 区间覆盖的字节数
    pub fn len(&self) -> usize {
        self.offset_end - self.offset_start
    }

    pub fn is_empty(&self) -> bool {
        self.offset_start == self.offset_end
    }

    /// 区间覆盖的码点数
    pub fn columns(&self) -> usize {
        self.column_end - self.column_start
    }

    /// 取出区间对应的输入片段
    ///
    /// 区间不属于该输入时返回空串
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.offset_start..self.offset_end).unwrap_or("")
    }
}
