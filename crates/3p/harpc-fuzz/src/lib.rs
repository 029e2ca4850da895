//! harpc-fuzz 公共支持库。
//!
//! # 教案式定位
//! - **Why**：fuzz target 与常规回归测试共享同一套“解码后再编码”的检查逻辑，
//!   CI 无需 nightly 工具链即可复现语料中的崩溃样本。
//! - **What**：[`BeginCase`] 描述可由 fuzzer 结构化生成的 Begin 帧，
//!   [`check_decode`] 对任意字节执行解码稳定性检查。
//! - **How**：检查失败一律 `panic!`，由 libFuzzer 捕获并保存样本。

use arbitrary::Arbitrary;
use harpc_codec_request::RequestBegin;
use harpc_codecs::{
    CodecLimits, CursorBuffer, Payload, ProcedureDescriptor, ProcedureId, SubsystemDescriptor,
    SubsystemId, Version,
};

/// 结构化生成的 Begin 帧字段。
#[derive(Debug, Arbitrary)]
pub struct BeginCase {
    /// 子系统标识。
    pub subsystem: u16,
    /// 版本 `(major, minor)`。
    pub version: (u8, u8),
    /// 过程标识。
    pub procedure: u16,
    /// 负载内容，超过上限时编码应当失败而不是截断。
    pub payload: Vec<u8>,
    /// 写入保留区的任意字节。
    pub reserved: [u8; 13],
}

impl BeginCase {
    /// 组装成 Begin 帧。
    pub fn message(&self) -> RequestBegin {
        RequestBegin::new(
            SubsystemDescriptor::new(
                SubsystemId::new(self.subsystem),
                Version::new(self.version.0, self.version.1),
            ),
            ProcedureDescriptor::new(ProcedureId::new(self.procedure)),
            Payload::new(self.payload.clone()),
        )
    }
}

/// 任意字节：解码不得 panic；成功时重新编码必须复现被消费的字节（保留区除外），
/// 失败时游标必须回到起点。
pub fn check_decode(data: &[u8]) {
    let mut buffer = CursorBuffer::reader(data);
    match RequestBegin::decode(&mut buffer) {
        Ok(message) => {
            let consumed = buffer.position();
            assert_eq!(consumed, message.encoded_len());

            let encoded = match message.to_bytes(&CodecLimits::default()) {
                Ok(encoded) => encoded,
                Err(err) => panic!("decoded frame failed to re-encode: {err}"),
            };
            let reserved = 6..RequestBegin::HEADER_LEN;
            assert_eq!(encoded[..reserved.start], data[..reserved.start]);
            assert_eq!(encoded[reserved.end..], data[reserved.end..consumed]);
        }
        Err(_) => assert_eq!(buffer.position(), 0),
    }
}

/// 结构化输入：编码成功的帧在保留区被任意改写后仍解码为同一值；
/// 超过负载上限的帧必须编码失败。
pub fn check_roundtrip(case: &BeginCase) {
    let message = case.message();
    let encoded = match message.to_bytes(&CodecLimits::default()) {
        Ok(encoded) => encoded,
        Err(err) => {
            assert!(case.payload.len() > Payload::MAX_SIZE, "unexpected encode failure: {err}");
            return;
        }
    };

    let mut wire = encoded.to_vec();
    wire[6..RequestBegin::HEADER_LEN].copy_from_slice(&case.reserved);
    match RequestBegin::from_bytes(&wire) {
        Ok(decoded) => assert_eq!(decoded, message),
        Err(err) => panic!("encoded frame failed to decode: {err}"),
    }
}
