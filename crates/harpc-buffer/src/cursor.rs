use bytes::{Bytes, BytesMut};

use crate::BufferError;

/// 缓冲的容量策略，在构造时确定，之后不可更改。
///
/// - `Fixed(limit)`：数据长度永远不超过 `limit`，越界写入返回 [`BufferError::Overflow`]；
/// - `Growable`：按需扩容，仅受内存分配器限制。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// 固定上限（字节）。
    Fixed(usize),
    /// 按需增长。
    Growable,
}

impl Capacity {
    /// 返回固定上限；`Growable` 返回 `None`。
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Capacity::Fixed(limit) => Some(limit),
            Capacity::Growable => None,
        }
    }
}

/// 游标缓冲的工作模式，只影响“越过数据末尾”的 [`advance`](CursorBuffer::advance) 语义。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// 编码：越过末尾时以零填充并受容量约束。
    Write,
    /// 解码：越过末尾即下溢。
    Read,
}

/// 带读写游标的字节缓冲，是所有字段编解码器共享的底座。
///
/// # 契约说明（What）
/// - `position <= len` 恒成立；
/// - [`write_bytes`](Self::write_bytes) 从游标处覆盖已有字节，不足部分追加到末尾；
/// - [`read_bytes`](Self::read_bytes) 剩余不足时返回 [`BufferError::Underflow`]，游标不动；
/// - 任何失败的操作都不会修改缓冲内容或游标。
///
/// # 实现策略（How）
/// - 数据存放在 `BytesMut` 中，编码结束后通过 [`freeze`](Self::freeze) 零拷贝转换为 `Bytes`；
/// - 固定容量在写入前统一校验，因此单次写入要么完整落地，要么完全不写。
///
/// # 风险提示（Trade-offs）
/// - 读模式的构造会复制一次输入字节，换取与写模式共用同一套游标逻辑。
#[derive(Debug, Clone)]
pub struct CursorBuffer {
    data: BytesMut,
    position: usize,
    capacity: Capacity,
    mode: CursorMode,
}

impl CursorBuffer {
    /// 构造编码用的空缓冲；不预分配，需要时调用 [`reserve`](Self::reserve)。
    #[must_use]
    pub fn writer(capacity: Capacity) -> Self {
        Self {
            data: BytesMut::new(),
            position: 0,
            capacity,
            mode: CursorMode::Write,
        }
    }

    /// 构造固定容量的编码缓冲。
    #[must_use]
    pub fn with_fixed_capacity(limit: usize) -> Self {
        Self::writer(Capacity::Fixed(limit))
    }

    /// 构造可增长的编码缓冲。
    #[must_use]
    pub fn growable() -> Self {
        Self::writer(Capacity::Growable)
    }

    /// 以收到的字节构造解码用缓冲，游标位于起点。
    #[must_use]
    pub fn reader(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            data: BytesMut::from(bytes.as_ref()),
            position: 0,
            capacity: Capacity::Growable,
            mode: CursorMode::Read,
        }
    }

    /// 当前游标位置。
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// 缓冲中已有的数据长度。
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 缓冲是否不含任何数据。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 游标之后尚未读取的字节数。
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// 构造时确定的容量策略。
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// 工作模式。
    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// 全部数据（不受游标影响）。
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 游标之后的数据。
    #[must_use]
    pub fn remaining_bytes(&self) -> &[u8] {
        &self.data[self.position..]
    }

    /// 在游标处写入 `bytes` 并推进游标。
    ///
    /// - 游标之后已有数据时逐字节覆盖，超出部分追加；
    /// - 固定容量不足时返回 [`BufferError::Overflow`]，且不写入任何字节。
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let end = self.checked_end(bytes.len())?;

        let overlap = self.data.len().min(end) - self.position;
        self.data[self.position..self.position + overlap].copy_from_slice(&bytes[..overlap]);
        self.data.extend_from_slice(&bytes[overlap..]);
        self.position = end;
        Ok(())
    }

    /// 读取接下来的 `count` 个字节并推进游标。
    pub fn read_bytes(&mut self, count: usize) -> Result<&[u8], BufferError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(BufferError::Underflow {
                requested: count,
                remaining,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }

    /// 读取定长数组，常用于大端整数字段。
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// 不读不写地移动游标 `count` 字节，用于跳过保留区。
    ///
    /// - 目标位置仍在已有数据内：直接移动，已有字节保持不变；
    /// - 越过末尾且处于 [`CursorMode::Read`]：返回 [`BufferError::Underflow`]；
    /// - 越过末尾且处于 [`CursorMode::Write`]：以零填充空缺部分，受固定容量约束。
    pub fn advance(&mut self, count: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if count <= remaining {
            self.position += count;
            return Ok(());
        }

        match self.mode {
            CursorMode::Read => Err(BufferError::Underflow {
                requested: count,
                remaining,
            }),
            CursorMode::Write => {
                let end = self.checked_end(count)?;
                self.data.resize(end, 0);
                self.position = end;
                Ok(())
            }
        }
    }

    /// 只在已有数据内跳过 `count` 字节，与模式无关。
    ///
    /// 解码路径使用：剩余不足时返回 [`BufferError::Underflow`]，缓冲内容与游标都不变。
    pub fn skip(&mut self, count: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(BufferError::Underflow {
                requested: count,
                remaining,
            });
        }
        self.position += count;
        Ok(())
    }

    /// 将游标移动到 `position`（通常是更早的位置），不得超过数据长度。
    pub fn rewind(&mut self, position: usize) -> Result<(), BufferError> {
        if position > self.data.len() {
            return Err(BufferError::OutOfBounds {
                position,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// 在数据末尾追加字节，游标保持不动。
    ///
    /// 传输层在半帧解码失败后补充新到达的数据时使用。
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if let Some(limit) = self.capacity.limit() {
            let available = limit.saturating_sub(self.data.len());
            if bytes.len() > available {
                return Err(BufferError::Overflow {
                    requested: bytes.len(),
                    available,
                });
            }
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// 预留至少 `additional` 字节的底层存储，固定容量时不超过上限。
    ///
    /// 只影响分配行为，不改变数据、游标或容量策略。
    pub fn reserve(&mut self, additional: usize) {
        let additional = match self.capacity.limit() {
            Some(limit) => additional.min(limit.saturating_sub(self.data.len())),
            None => additional,
        };
        self.data.reserve(additional);
    }

    /// 清空数据并将游标归零，保留容量策略与模式。
    pub fn clear(&mut self) {
        self.data.clear();
        self.position = 0;
    }

    /// 消耗缓冲并冻结为只读 `Bytes`。
    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    /// 计算写入 `count` 字节后的游标位置，并校验固定容量。
    fn checked_end(&self, count: usize) -> Result<usize, BufferError> {
        let available = match self.capacity {
            Capacity::Fixed(limit) => limit.saturating_sub(self.position),
            Capacity::Growable => usize::MAX - self.position,
        };
        if count > available {
            return Err(BufferError::Overflow {
                requested: count,
                available,
            });
        }
        Ok(self.position + count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_back() {
        let mut buffer = CursorBuffer::growable();
        buffer.write_bytes(b"harpc").expect("growable write");
        assert_eq!(buffer.position(), 5);
        assert_eq!(buffer.remaining(), 0);

        buffer.rewind(0).expect("rewind to start");
        assert_eq!(buffer.read_bytes(3).expect("read prefix"), b"har");
        assert_eq!(buffer.read_array::<2>().expect("read suffix"), *b"pc");
    }

    #[test]
    fn write_overwrites_existing_bytes_before_appending() {
        let mut buffer = CursorBuffer::growable();
        buffer.write_bytes(&[1, 2, 3]).expect("initial write");
        buffer.rewind(1).expect("rewind");
        buffer.write_bytes(&[9, 9, 9]).expect("overwrite");
        assert_eq!(buffer.as_bytes(), &[1, 9, 9, 9]);
        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn fixed_capacity_rejects_whole_write() {
        let mut buffer = CursorBuffer::with_fixed_capacity(4);
        buffer.write_bytes(&[1, 2, 3]).expect("fits");
        let err = buffer.write_bytes(&[4, 5]).expect_err("exceeds capacity");
        assert_eq!(
            err,
            BufferError::Overflow {
                requested: 2,
                available: 1
            }
        );
        // 失败的写入不得留下半截数据。
        assert_eq!(buffer.as_bytes(), &[1, 2, 3]);
        assert_eq!(buffer.position(), 3);
    }

    #[test]
    fn read_past_end_underflows_without_moving() {
        let mut buffer = CursorBuffer::reader([1u8, 2]);
        let err = buffer.read_bytes(3).expect_err("only two bytes");
        assert_eq!(
            err,
            BufferError::Underflow {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn advance_in_write_mode_zero_fills() {
        let mut buffer = CursorBuffer::growable();
        buffer.write_bytes(&[0xff]).expect("write");
        buffer.advance(3).expect("zero fill");
        assert_eq!(buffer.as_bytes(), &[0xff, 0, 0, 0]);
        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn advance_in_write_mode_keeps_existing_bytes() {
        let mut buffer = CursorBuffer::growable();
        buffer.write_bytes(&[7, 7, 7]).expect("write");
        buffer.rewind(0).expect("rewind");
        buffer.advance(2).expect("skip");
        assert_eq!(buffer.as_bytes(), &[7, 7, 7]);
        assert_eq!(buffer.position(), 2);
    }

    #[test]
    fn advance_in_write_mode_respects_capacity() {
        let mut buffer = CursorBuffer::with_fixed_capacity(2);
        let err = buffer.advance(3).expect_err("over capacity");
        assert!(err.is_overflow());
        assert!(buffer.is_empty());
    }

    #[test]
    fn advance_in_read_mode_underflows() {
        let mut buffer = CursorBuffer::reader([0u8; 4]);
        buffer.advance(4).expect("skip all");
        let err = buffer.advance(1).expect_err("nothing left");
        assert!(err.is_underflow());
        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn skip_never_extends_a_writer() {
        let mut buffer = CursorBuffer::growable();
        buffer.write_bytes(&[1, 2]).expect("write");
        buffer.rewind(0).expect("rewind");
        buffer.skip(1).expect("within data");

        let err = buffer.skip(2).expect_err("one byte left");
        assert_eq!(
            err,
            BufferError::Underflow {
                requested: 2,
                remaining: 1
            }
        );
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.position(), 1);

        let mut fixed = CursorBuffer::with_fixed_capacity(4);
        assert!(fixed.skip(3).expect_err("empty writer").is_underflow());
        assert!(fixed.is_empty());
    }

    #[test]
    fn clear_resets_data_and_keeps_policy() {
        let mut buffer = CursorBuffer::with_fixed_capacity(4);
        buffer.write_bytes(&[1, 2, 3]).expect("write");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.capacity(), Capacity::Fixed(4));
        assert_eq!(buffer.mode(), CursorMode::Write);
        buffer.write_bytes(&[9; 4]).expect("full capacity available again");
    }

    #[test]
    fn rewind_rejects_positions_past_end() {
        let mut buffer = CursorBuffer::reader([1u8, 2, 3]);
        assert_eq!(
            buffer.rewind(4),
            Err(BufferError::OutOfBounds {
                position: 4,
                len: 3
            })
        );
    }

    #[test]
    fn feed_appends_without_moving_cursor() {
        let mut buffer = CursorBuffer::reader([1u8]);
        buffer.read_bytes(1).expect("consume");
        buffer.feed(&[2, 3]).expect("append");
        assert_eq!(buffer.position(), 1);
        assert_eq!(buffer.remaining_bytes(), &[2, 3]);
    }

    #[test]
    fn freeze_keeps_written_bytes() {
        let mut buffer = CursorBuffer::with_fixed_capacity(8);
        buffer.write_bytes(b"abc").expect("write");
        buffer.advance(1).expect("pad");
        assert_eq!(buffer.freeze().as_ref(), b"abc\0");
    }
}
