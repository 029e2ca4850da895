#![warn(missing_docs)]

//! # harpc-codecs
//!
//! ## 职责定位（Why）
//! - 为 harpc 各类帧（当前为请求的 Begin 帧）提供统一的字段编解码契约与组合器，
//!   帧类型只需声明字段顺序即可获得编码、解码、错误定位与日志；
//! - 承载跨帧复用的基础字段：子系统/过程描述符与自描述长度的负载。
//!
//! ## 使用方式（How）
//! - 字段类型实现 [`Encode`]/[`Decode`]，直接在 [`harpc_buffer::CursorBuffer`] 上读写；
//! - 帧类型实现 [`Frame`]，在 `encode_fields`/`decode_fields` 中通过 [`Chain`] 逐步调用字段；
//! - 调用方使用 [`encode_frame`]/[`decode_frame`]（或整帧版本 [`encode_to_bytes`]/[`decode_from_bytes`]）。
//!
//! ## 契约说明（What）
//! - 任意一步失败立即停止，返回的 [`FrameError`] 指明帧名、方向、步序与字段；
//! - 编码失败不回滚已写入字节；解码失败会把游标退回帧起点；
//! - 所有错误都有稳定错误码（见 [`codes`]），便于日志聚合。
//!
//! ## Feature
//! - `proptest`：为描述符与负载提供 `proptest::arbitrary::Arbitrary` 实现。

mod chain;
mod codec;
pub mod descriptor;
mod error;
mod frame;
mod limits;
pub mod payload;

pub use chain::{Chain, Direction};
pub use codec::{Decode, Encode};
pub use descriptor::{
    Descriptor, ProcedureDescriptor, ProcedureId, SubsystemDescriptor, SubsystemId, Version,
};
pub use error::{CodecError, FrameError, codes};
pub use frame::{Frame, decode_frame, decode_from_bytes, encode_frame, encode_to_bytes};
pub use limits::{CodecLimits, LimitsError};
pub use payload::Payload;

/// 重新导出游标缓冲，协议 crate 无需再单独依赖 `harpc-buffer`。
pub use harpc_buffer::{BufferError, Capacity, CursorBuffer, CursorMode};
