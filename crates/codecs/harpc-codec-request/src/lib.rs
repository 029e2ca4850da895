#![warn(missing_docs)]

//! # harpc-codec-request
//!
//! ## 职责定位（Why）
//! - 承载请求协议中 Begin 帧的值类型 [`RequestBegin`] 及其线上编解码；
//! - 供上层请求分发组件构造、发送与识别请求起始帧。
//!
//! ## 线上布局（What）
//! | 字段 | 宽度 | 说明 |
//! |---|---|---|
//! | 子系统描述符 | 4 | id `u16` 大端、版本 major、minor |
//! | 过程描述符 | 2 | id `u16` 大端 |
//! | 保留区 | 13 | 编码时跳过（新空间补零），解码时跳过 |
//! | 负载 | 2 + n | `u16` 大端长度前缀 |
//!
//! ## 使用方式（How）
//! ```
//! use harpc_codec_request::{decode, encode, make};
//! use harpc_codecs::{
//!     CursorBuffer, Payload, ProcedureDescriptor, ProcedureId, SubsystemDescriptor,
//!     SubsystemId, Version,
//! };
//!
//! let message = make(
//!     SubsystemDescriptor::new(SubsystemId::new(7), Version::new(1, 0)),
//!     ProcedureDescriptor::new(ProcedureId::new(42)),
//!     Payload::from_static(&[1, 2, 3]),
//! );
//!
//! let mut buffer = CursorBuffer::growable();
//! encode(&message, &mut buffer)?;
//! assert_eq!(buffer.len(), 24);
//!
//! let mut reader = CursorBuffer::reader(buffer.as_bytes());
//! assert_eq!(decode(&mut reader)?, message);
//! # Ok::<(), harpc_codecs::FrameError>(())
//! ```

mod begin;
mod kind;

pub use begin::RequestBegin;
pub use kind::RequestFrame;

use harpc_codecs::{CursorBuffer, FrameError, Payload, ProcedureDescriptor, SubsystemDescriptor};

/// 构造 Begin 帧，不做额外校验。
#[must_use]
pub fn make(
    subsystem: SubsystemDescriptor,
    procedure: ProcedureDescriptor,
    payload: Payload,
) -> RequestBegin {
    RequestBegin::new(subsystem, procedure, payload)
}

/// 按固定字段顺序写入 Begin 帧；失败时已写入的字节保留在缓冲中。
pub fn encode(message: &RequestBegin, buffer: &mut CursorBuffer) -> Result<(), FrameError> {
    message.encode(buffer)
}

/// 按固定字段顺序读出 Begin 帧；失败时游标退回帧起点。
pub fn decode(buffer: &mut CursorBuffer) -> Result<RequestBegin, FrameError> {
    RequestBegin::decode(buffer)
}

/// 帧种类判别：是否为 Begin 帧。
#[must_use]
pub fn is_request_begin(frame: &RequestFrame) -> bool {
    frame.is_request_begin()
}

/// 由独立生成的子系统、过程与负载组合出的 Begin 帧生成器。
///
/// 每次调用返回新的策略实例，互不共享状态。
#[cfg(any(test, feature = "proptest"))]
#[must_use]
pub fn arbitrary() -> proptest::strategy::BoxedStrategy<RequestBegin> {
    proptest::arbitrary::any::<RequestBegin>()
}
