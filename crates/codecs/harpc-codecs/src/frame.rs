//! 帧契约与统一驱动。
//!
//! # 设计概览（Why）
//! - 每种帧只声明字段顺序（[`Frame::encode_fields`]/[`Frame::decode_fields`]），
//!   日志、失败回退与整帧校验集中在本模块的驱动函数中，新增帧类型无需重复这些逻辑；
//! - 驱动函数是泛型的，单态化后与手写字段序列等价。
//!
//! # 契约（What）
//! - [`encode_frame`]：首个失败步骤即返回，已写入字节不回滚；
//! - [`decode_frame`]：失败时游标退回帧起点，帧被整体拒绝；
//! - [`encode_to_bytes`]：在独立暂存缓冲中编码，只在完全成功时产出字节；
//! - [`decode_from_bytes`]：要求输入恰好是一帧，多余字节以 [`CodecError::TrailingBytes`] 报告。

use bytes::Bytes;
use harpc_buffer::CursorBuffer;
use tracing::{debug, trace, warn};

use crate::{Chain, CodecLimits, Direction, FrameError};

#[cfg(doc)]
use crate::CodecError;

/// 由若干字段按固定顺序组成的帧。
///
/// 两个方法必须以相同顺序调用 [`Chain`] 的步骤，否则编码与解码不再互逆。
pub trait Frame: Sized {
    /// 帧名称，出现在错误与日志中。
    const NAME: &'static str;

    /// 依次写入各字段。
    fn encode_fields(&self, chain: &mut Chain<'_>) -> Result<(), FrameError>;

    /// 依次读出各字段。
    fn decode_fields(chain: &mut Chain<'_>) -> Result<Self, FrameError>;
}

/// 将帧写入 `buffer` 的当前游标处。
pub fn encode_frame<F: Frame>(frame: &F, buffer: &mut CursorBuffer) -> Result<(), FrameError> {
    let start = buffer.position();
    let mut chain = Chain::new(F::NAME, Direction::Encode, buffer);
    let outcome = frame.encode_fields(&mut chain);
    let steps = chain.steps();

    match &outcome {
        Ok(()) => trace!(
            frame = F::NAME,
            steps,
            bytes = buffer.position().saturating_sub(start),
            "frame encoded"
        ),
        Err(err) => report_failure(err),
    }
    outcome
}

/// 从 `buffer` 的当前游标处读出一帧；失败时游标回到调用前的位置。
pub fn decode_frame<F: Frame>(buffer: &mut CursorBuffer) -> Result<F, FrameError> {
    decode_at(buffer, false)
}

/// 在按 `limits` 构造的暂存缓冲中编码整帧，成功后冻结为 `Bytes`。
pub fn encode_to_bytes<F: Frame>(frame: &F, limits: &CodecLimits) -> Result<Bytes, FrameError> {
    let mut scratch = limits.scratch_buffer();
    encode_frame(frame, &mut scratch)?;
    Ok(scratch.freeze())
}

/// 把 `bytes` 整体解码为一帧。
pub fn decode_from_bytes<F: Frame>(bytes: impl AsRef<[u8]>) -> Result<F, FrameError> {
    let mut buffer = CursorBuffer::reader(bytes);
    decode_at(&mut buffer, true)
}

fn decode_at<F: Frame>(buffer: &mut CursorBuffer, whole: bool) -> Result<F, FrameError> {
    let start = buffer.position();
    let mut chain = Chain::new(F::NAME, Direction::Decode, buffer);
    let outcome = F::decode_fields(&mut chain).and_then(|frame| {
        if whole {
            chain.expect_end()?;
        }
        Ok(frame)
    });
    let steps = chain.steps();

    match outcome {
        Ok(frame) => {
            trace!(
                frame = F::NAME,
                steps,
                bytes = buffer.position().saturating_sub(start),
                "frame decoded"
            );
            Ok(frame)
        }
        Err(err) => {
            if let Err(rewind) = buffer.rewind(start) {
                warn!(frame = F::NAME, error = %rewind, "failed to rewind after decode failure");
            }
            report_failure(&err);
            Err(err)
        }
    }
}

fn report_failure(err: &FrameError) {
    debug!(
        frame = err.frame(),
        direction = %err.direction(),
        step = err.step(),
        field = err.field(),
        code = err.code(),
        error = %err.codec_error(),
        "frame codec failed"
    );
}
