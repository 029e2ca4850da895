//! 字段组合器：在同一个游标缓冲上按顺序执行字段编解码步骤。
//!
//! # 行为概览（How）
//! - [`Chain`] 独占借用一帧编解码期间的 [`CursorBuffer`]，每次 [`Chain::step`] 调用都计为一步；
//! - 步骤返回 `Err` 时被包装为 [`FrameError`]（帧名、方向、步序、字段），调用方以 `?` 直接短路；
//! - 游标的推进由字段编解码器自身完成，下一步从上一步结束的位置继续。
//!
//! # 契约（What）
//! - 组合器从不重试、吞掉或改写错误；
//! - 帧实现中步骤的书写顺序即线上字段顺序，编码与解码必须使用相同顺序。

use core::fmt;

use harpc_buffer::CursorBuffer;

use crate::{CodecError, Decode, Encode, FrameError};

/// 组合器运行的方向，出现在错误与日志中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 编码。
    Encode,
    /// 解码。
    Decode,
}

impl Direction {
    /// 稳定的小写名称。
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一帧编解码过程中的步骤链。
///
/// # 使用方式（How）
/// ```
/// use harpc_codecs::{Chain, CursorBuffer, Direction, ProcedureDescriptor, ProcedureId};
///
/// let mut buffer = CursorBuffer::growable();
/// let mut chain = Chain::new("Example", Direction::Encode, &mut buffer);
/// chain.put("procedure", &ProcedureDescriptor::new(ProcedureId::new(42)))?;
/// chain.skip("reserved", 2)?;
/// assert_eq!(chain.steps(), 2);
/// assert_eq!(buffer.as_bytes(), &[0x00, 0x2a, 0x00, 0x00]);
/// # Ok::<(), harpc_codecs::FrameError>(())
/// ```
pub struct Chain<'b> {
    buffer: &'b mut CursorBuffer,
    frame: &'static str,
    direction: Direction,
    steps: usize,
}

impl<'b> Chain<'b> {
    /// 为帧 `frame` 创建步骤链。
    pub fn new(frame: &'static str, direction: Direction, buffer: &'b mut CursorBuffer) -> Self {
        Self {
            buffer,
            frame,
            direction,
            steps: 0,
        }
    }

    /// 执行一步：把缓冲交给 `run`，失败时记录步序与字段名。
    ///
    /// `run` 的错误类型只需能转换为 [`CodecError`]，因此缓冲原语（返回
    /// [`BufferError`](harpc_buffer::BufferError)）与字段编解码器都可以直接作为步骤。
    pub fn step<T, E>(
        &mut self,
        field: &'static str,
        run: impl FnOnce(&mut CursorBuffer) -> Result<T, E>,
    ) -> Result<T, FrameError>
    where
        E: Into<CodecError>,
    {
        let index = self.steps;
        self.steps += 1;
        run(&mut *self.buffer)
            .map_err(|err| FrameError::new(self.frame, self.direction, index, field, err.into()))
    }

    /// 编码步骤：写入字段值。
    pub fn put<T>(&mut self, field: &'static str, value: &T) -> Result<(), FrameError>
    where
        T: Encode + ?Sized,
    {
        self.step(field, |buffer| value.encode(buffer))
    }

    /// 解码步骤：读出字段值。
    pub fn take<T: Decode>(&mut self, field: &'static str) -> Result<T, FrameError> {
        self.step(field, T::decode)
    }

    /// 跳过 `count` 字节（保留区、对齐填充）。
    ///
    /// 编码时越过末尾的部分补零；解码时只在已有数据内移动，不足即下溢，
    /// 即使缓冲处于写模式也不会改动其内容。
    pub fn skip(&mut self, field: &'static str, count: usize) -> Result<(), FrameError> {
        match self.direction {
            Direction::Encode => self.step(field, |buffer| buffer.advance(count)),
            Direction::Decode => self.step(field, |buffer| buffer.skip(count)),
        }
    }

    /// 要求缓冲已被完全消费，否则以 [`CodecError::TrailingBytes`] 失败。
    pub fn expect_end(&mut self) -> Result<(), FrameError> {
        self.step("end", |buffer| match buffer.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes { remaining }),
        })
    }

    /// 已执行（含失败的那一步）的步骤数。
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// 当前游标位置。
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    /// 帧名称。
    #[must_use]
    pub fn frame(&self) -> &'static str {
        self.frame
    }

    /// 方向。
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
