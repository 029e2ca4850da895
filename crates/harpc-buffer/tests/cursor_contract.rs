//! `cursor_contract` 集成测试：以影子模型校验 `CursorBuffer` 的游标契约。
//!
//! # 测试总览（Why）
//! - 随机操作序列覆盖写入、读取、跳过、回退四类操作的交错；
//! - 影子模型使用 `Vec<u8>` + `usize` 复刻契约，任何偏差都会被定位到具体操作。
//!
//! # 断言（What）
//! - 每一步的成功/失败与模型一致，失败分类（下溢/上溢）一致；
//! - 每一步之后 `position <= len`，数据内容与模型逐字节相等。

use harpc_buffer::{BufferError, Capacity, CursorBuffer, CursorMode};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
    Advance(usize),
    Rewind(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Op::Write),
        (0usize..10).prop_map(Op::Read),
        (0usize..10).prop_map(Op::Advance),
        (0usize..24).prop_map(Op::Rewind),
    ]
}

/// 契约的影子实现。
struct Model {
    data: Vec<u8>,
    position: usize,
    limit: Option<usize>,
    mode: CursorMode,
}

impl Model {
    fn apply(&mut self, op: &Op) -> Result<Option<Vec<u8>>, BufferError> {
        match op {
            Op::Write(bytes) => {
                let end = self.position + bytes.len();
                self.check_limit(end, bytes.len())?;
                for (offset, byte) in bytes.iter().enumerate() {
                    let at = self.position + offset;
                    if at < self.data.len() {
                        self.data[at] = *byte;
                    } else {
                        self.data.push(*byte);
                    }
                }
                self.position = end;
                Ok(None)
            }
            Op::Read(count) => {
                let remaining = self.data.len() - self.position;
                if *count > remaining {
                    return Err(BufferError::Underflow {
                        requested: *count,
                        remaining,
                    });
                }
                let out = self.data[self.position..self.position + count].to_vec();
                self.position += count;
                Ok(Some(out))
            }
            Op::Advance(count) => {
                let remaining = self.data.len() - self.position;
                let end = self.position + count;
                if *count > remaining {
                    if self.mode == CursorMode::Read {
                        return Err(BufferError::Underflow {
                            requested: *count,
                            remaining,
                        });
                    }
                    self.check_limit(end, *count)?;
                    self.data.resize(end, 0);
                }
                self.position = end;
                Ok(None)
            }
            Op::Rewind(position) => {
                if *position > self.data.len() {
                    return Err(BufferError::OutOfBounds {
                        position: *position,
                        len: self.data.len(),
                    });
                }
                self.position = *position;
                Ok(None)
            }
        }
    }

    fn check_limit(&self, end: usize, requested: usize) -> Result<(), BufferError> {
        match self.limit {
            Some(limit) if end > limit => Err(BufferError::Overflow {
                requested,
                available: limit.saturating_sub(self.position),
            }),
            _ => Ok(()),
        }
    }
}

fn run(buffer: &mut CursorBuffer, op: &Op) -> Result<Option<Vec<u8>>, BufferError> {
    match op {
        Op::Write(bytes) => buffer.write_bytes(bytes).map(|_| None),
        Op::Read(count) => buffer.read_bytes(*count).map(|bytes| Some(bytes.to_vec())),
        Op::Advance(count) => buffer.advance(*count).map(|_| None),
        Op::Rewind(position) => buffer.rewind(*position).map(|_| None),
    }
}

proptest! {
    #[test]
    fn prop_writer_matches_model(
        limit in prop::option::of(0usize..24),
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let capacity = limit.map_or(Capacity::Growable, Capacity::Fixed);
        let mut buffer = CursorBuffer::writer(capacity);
        let mut model = Model { data: Vec::new(), position: 0, limit, mode: CursorMode::Write };

        for op in &ops {
            prop_assert_eq!(run(&mut buffer, op), model.apply(op), "op {:?}", op);
            prop_assert!(buffer.position() <= buffer.len());
            prop_assert_eq!(buffer.position(), model.position);
            prop_assert_eq!(buffer.as_bytes(), model.data.as_slice());
        }
    }

    #[test]
    fn prop_reader_matches_model(
        input in prop::collection::vec(any::<u8>(), 0..16),
        ops in prop::collection::vec(op(), 0..32),
    ) {
        let mut buffer = CursorBuffer::reader(&input);
        let mut model = Model { data: input.clone(), position: 0, limit: None, mode: CursorMode::Read };

        for op in &ops {
            prop_assert_eq!(run(&mut buffer, op), model.apply(op), "op {:?}", op);
            prop_assert!(buffer.position() <= buffer.len());
            prop_assert_eq!(buffer.position(), model.position);
            prop_assert_eq!(buffer.as_bytes(), model.data.as_slice());
        }
    }
}
