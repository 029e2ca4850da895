use harpc_buffer::CursorBuffer;

use crate::CodecError;

/// 字段级编码契约：把自身写入游标缓冲。
///
/// # 契约说明（What）
/// - 成功时恰好写入 [`encoded_len`](Self::encoded_len) 个字节，游标同步前移；
/// - 失败时返回 [`CodecError`]，之前已写入的字节不回滚；
/// - 实现不得持有缓冲引用，调用结束即释放。
pub trait Encode {
    /// 写入线上表示。
    fn encode(&self, buffer: &mut CursorBuffer) -> Result<(), CodecError>;

    /// 线上表示的字节数。
    fn encoded_len(&self) -> usize;
}

/// 字段级解码契约：从游标处读出一个值。
///
/// - 成功时游标恰好前移该值的线上长度；
/// - 输入不足时返回 [`BufferError::Underflow`](harpc_buffer::BufferError::Underflow)。
pub trait Decode: Sized {
    /// 读取线上表示并还原值。
    fn decode(buffer: &mut CursorBuffer) -> Result<Self, CodecError>;
}
