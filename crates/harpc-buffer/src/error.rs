//! 游标缓冲错误类型。

use thiserror::Error;

/// 游标缓冲操作失败的分类。
///
/// - `Underflow`：读取或跳过请求的字节数超过剩余数据，对应解码时的输入截断；
/// - `Overflow`：写入或补零会超出固定容量，对应编码时的缓冲不足；
/// - `OutOfBounds`：[`rewind`](crate::CursorBuffer::rewind) 指定的位置超出已有数据。
///
/// 所有变体只携带 `usize`，可复制、可直接断言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// 剩余字节不足。
    #[error("buffer underflow: requested {requested} bytes, {remaining} remaining")]
    Underflow {
        /// 请求的字节数。
        requested: usize,
        /// 游标之后实际剩余的字节数。
        remaining: usize,
    },
    /// 固定容量不足。
    #[error("buffer overflow: requested {requested} bytes, {available} available")]
    Overflow {
        /// 请求写入（或补零）的字节数。
        requested: usize,
        /// 游标到容量上限之间可用的字节数。
        available: usize,
    },
    /// 游标目标位置越界。
    #[error("cursor position {position} is out of bounds for buffer of length {len}")]
    OutOfBounds {
        /// 请求设置的游标位置。
        position: usize,
        /// 当前缓冲长度。
        len: usize,
    },
}

impl BufferError {
    /// 是否为下溢错误。
    #[must_use]
    pub const fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow { .. })
    }

    /// 是否为上溢错误。
    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}
