//! 编解码错误类型与稳定错误码。
//!
//! # 分层（What）
//! - [`CodecError`]：单个字段编解码器的失败，缓冲错误原样透传；
//! - [`FrameError`]：组合器在帧层面记录“第几步、哪个字段”失败，原始 [`CodecError`] 作为 `source` 保留。
//!
//! 组合器从不吞掉或恢复错误，调用方拿到的一定是第一处失败。

use harpc_buffer::BufferError;
use thiserror::Error;

use crate::Direction;

/// 错误码常量，遵循 `<领域>.<语义>` 命名。
pub mod codes {
    /// 解码时剩余字节不足。
    pub const PROTOCOL_UNDERFLOW: &str = "protocol.underflow";
    /// 编码时超出固定容量。
    pub const PROTOCOL_OVERFLOW: &str = "protocol.overflow";
    /// 游标目标位置越界。
    pub const PROTOCOL_OUT_OF_BOUNDS: &str = "protocol.out_of_bounds";
    /// 负载超过协议上限。
    pub const PROTOCOL_PAYLOAD_TOO_LARGE: &str = "protocol.payload_too_large";
    /// 整帧解码后仍有多余字节。
    pub const PROTOCOL_TRAILING_BYTES: &str = "protocol.trailing_bytes";
}

/// 字段编解码器的失败分类。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// 游标缓冲报告的下溢/上溢/越界。
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// 负载长度超过协议上限（编码时为实际长度，解码时为长度前缀声明的值）。
    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge {
        /// 负载长度。
        len: usize,
        /// 协议允许的最大长度。
        max: usize,
    },
    /// 整帧解码完成后缓冲中仍有未消费的字节。
    #[error("{remaining} trailing bytes after the frame")]
    TrailingBytes {
        /// 多余的字节数。
        remaining: usize,
    },
}

impl CodecError {
    /// 稳定错误码，见 [`codes`]。
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Buffer(BufferError::Underflow { .. }) => codes::PROTOCOL_UNDERFLOW,
            Self::Buffer(BufferError::Overflow { .. }) => codes::PROTOCOL_OVERFLOW,
            Self::Buffer(BufferError::OutOfBounds { .. }) => codes::PROTOCOL_OUT_OF_BOUNDS,
            Self::PayloadTooLarge { .. } => codes::PROTOCOL_PAYLOAD_TOO_LARGE,
            Self::TrailingBytes { .. } => codes::PROTOCOL_TRAILING_BYTES,
        }
    }

    /// 是否为输入截断导致的下溢。
    #[must_use]
    pub const fn is_underflow(&self) -> bool {
        matches!(self, Self::Buffer(BufferError::Underflow { .. }))
    }

    /// 是否为固定容量不足导致的上溢。
    #[must_use]
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Buffer(BufferError::Overflow { .. }))
    }
}

/// 帧编解码在某一步失败。
///
/// # 契约（What）
/// - `step` 从 0 开始计数，与 [`Frame`](crate::Frame) 实现中调用 [`Chain`](crate::Chain) 的顺序一致；
/// - `field` 为该步在帧实现中声明的字段名；
/// - `source` 为字段编解码器返回的原始错误，未经改写。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{direction} of `{frame}` failed at step {step} (`{field}`): {source}")]
pub struct FrameError {
    frame: &'static str,
    direction: Direction,
    step: usize,
    field: &'static str,
    source: CodecError,
}

impl FrameError {
    pub(crate) fn new(
        frame: &'static str,
        direction: Direction,
        step: usize,
        field: &'static str,
        source: CodecError,
    ) -> Self {
        Self {
            frame,
            direction,
            step,
            field,
            source,
        }
    }

    /// 帧名称。
    #[must_use]
    pub fn frame(&self) -> &'static str {
        self.frame
    }

    /// 编码还是解码。
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 失败步骤的序号（从 0 开始）。
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// 失败字段名。
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// 字段编解码器返回的原始错误。
    #[must_use]
    pub fn codec_error(&self) -> &CodecError {
        &self.source
    }

    /// 取出原始错误。
    #[must_use]
    pub fn into_codec_error(self) -> CodecError {
        self.source
    }

    /// 原始错误的稳定错误码。
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.source.code()
    }

    /// 是否因输入截断失败。
    #[must_use]
    pub fn is_underflow(&self) -> bool {
        self.source.is_underflow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_errors_map_to_stable_codes() {
        let underflow = CodecError::from(BufferError::Underflow {
            requested: 2,
            remaining: 1,
        });
        assert_eq!(underflow.code(), codes::PROTOCOL_UNDERFLOW);
        assert!(underflow.is_underflow());

        let overflow = CodecError::from(BufferError::Overflow {
            requested: 2,
            available: 0,
        });
        assert_eq!(overflow.code(), codes::PROTOCOL_OVERFLOW);
        assert!(overflow.is_overflow());
    }

    #[test]
    fn frame_error_display_names_step_and_field() {
        let err = FrameError::new(
            "RequestBegin",
            Direction::Decode,
            1,
            "procedure",
            CodecError::from(BufferError::Underflow {
                requested: 2,
                remaining: 0,
            }),
        );
        assert_eq!(
            err.to_string(),
            "decode of `RequestBegin` failed at step 1 (`procedure`): \
             buffer underflow: requested 2 bytes, 0 remaining"
        );
        assert!(err.is_underflow());
        assert_eq!(err.code(), codes::PROTOCOL_UNDERFLOW);
    }
}
