#![warn(missing_docs)]

//! `harpc-buffer` 提供 harpc 线协议编解码所依赖的游标缓冲。
//!
//! # 模块定位（Why）
//! - 所有字段编解码器都只通过一个“带游标的字节缓冲”读写数据，本 crate 落地该抽象；
//! - 底层存储基于 `bytes::BytesMut`，编码完成后可零拷贝冻结为 `Bytes` 交给传输层。
//!
//! # 设计概要（How）
//! - `cursor` 模块实现 [`CursorBuffer`]：写模式用于编码，读模式用于解码；
//! - 容量策略由 [`Capacity`] 在构造时决定（固定上限或按需增长），缓冲本身不做其他隐式扩容；
//! - `error` 模块定义 [`BufferError`]，区分下溢（读取越界）、上溢（超出固定容量）与游标越界。
//!
//! # 契约（What）
//! - 游标始终满足 `position <= len`；
//! - 任何读取请求超过剩余字节都会失败，绝不越界读取；
//! - 单个缓冲实例同一时间只服务一次编码或解码调用，内部不加锁。

mod cursor;
mod error;

pub use cursor::{Capacity, CursorBuffer, CursorMode};
pub use error::BufferError;
