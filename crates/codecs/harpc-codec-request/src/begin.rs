use core::fmt;

use bytes::Bytes;
use harpc_codecs::{
    Chain, CodecLimits, CursorBuffer, Descriptor, Encode, Frame, FrameError, Payload,
    ProcedureDescriptor, SubsystemDescriptor, decode_frame, decode_from_bytes, encode_frame,
    encode_to_bytes,
};
use serde::Serialize;

/// 请求的起始帧：目标子系统、目标过程与首段负载。
///
/// # 契约说明（What）
/// - 值对象，构造后不可变，不持有任何缓冲引用；
/// - 相等、哈希、展示与 JSON 形式只由 `(subsystem, procedure, payload)` 决定，保留区不参与；
/// - 线上字段顺序固定：子系统、过程、13 字节保留区、负载。
///
/// # 风险提示（Trade-offs）
/// - 编码失败不回滚，需要原子性的调用方使用 [`RequestBegin::to_bytes`]，
///   它在独立暂存缓冲中编码并只在成功时返回字节。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "_id", rename = "RequestBegin")]
pub struct RequestBegin {
    subsystem: SubsystemDescriptor,
    procedure: ProcedureDescriptor,
    payload: Payload,
}

impl RequestBegin {
    /// 保留区宽度。
    pub const RESERVED_LEN: usize = 13;

    /// 负载之前的固定头部宽度。
    pub const HEADER_LEN: usize =
        SubsystemDescriptor::WIDTH + ProcedureDescriptor::WIDTH + Self::RESERVED_LEN;

    /// 构造 Begin 帧。
    #[must_use]
    pub fn new(
        subsystem: SubsystemDescriptor,
        procedure: ProcedureDescriptor,
        payload: Payload,
    ) -> Self {
        Self {
            subsystem,
            procedure,
            payload,
        }
    }

    /// 目标子系统。
    #[must_use]
    pub fn subsystem(&self) -> SubsystemDescriptor {
        self.subsystem
    }

    /// 目标过程。
    #[must_use]
    pub fn procedure(&self) -> ProcedureDescriptor {
        self.procedure
    }

    /// 负载。
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// 拆分为字段。
    #[must_use]
    pub fn into_parts(self) -> (SubsystemDescriptor, ProcedureDescriptor, Payload) {
        (self.subsystem, self.procedure, self.payload)
    }

    /// 编码后的总字节数。
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_LEN + self.payload.encoded_len()
    }

    /// 写入 `buffer` 的当前游标处。
    pub fn encode(&self, buffer: &mut CursorBuffer) -> Result<(), FrameError> {
        encode_frame(self, buffer)
    }

    /// 从 `buffer` 的当前游标处读出；失败时游标退回调用前的位置。
    pub fn decode(buffer: &mut CursorBuffer) -> Result<Self, FrameError> {
        decode_frame(buffer)
    }

    /// 在暂存缓冲中编码整帧，只在完全成功时返回字节。
    pub fn to_bytes(&self, limits: &CodecLimits) -> Result<Bytes, FrameError> {
        encode_to_bytes(self, limits)
    }

    /// 把恰好一帧的字节解码为 Begin 帧。
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self, FrameError> {
        decode_from_bytes(bytes)
    }
}

impl Frame for RequestBegin {
    const NAME: &'static str = "RequestBegin";

    fn encode_fields(&self, chain: &mut Chain<'_>) -> Result<(), FrameError> {
        chain.put(SubsystemDescriptor::KIND, &self.subsystem)?;
        chain.put(ProcedureDescriptor::KIND, &self.procedure)?;
        chain.skip("reserved", Self::RESERVED_LEN)?;
        chain.put("payload", &self.payload)
    }

    fn decode_fields(chain: &mut Chain<'_>) -> Result<Self, FrameError> {
        let subsystem = chain.take(SubsystemDescriptor::KIND)?;
        let procedure = chain.take(ProcedureDescriptor::KIND)?;
        chain.skip("reserved", Self::RESERVED_LEN)?;
        let payload = chain.take("payload")?;
        Ok(Self::new(subsystem, procedure, payload))
    }
}

impl fmt::Display for RequestBegin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RequestBegin({}, {}, {})",
            self.subsystem, self.procedure, self.payload
        )
    }
}

#[cfg(any(test, feature = "proptest"))]
impl proptest::arbitrary::Arbitrary for RequestBegin {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;

        (
            any::<SubsystemDescriptor>(),
            any::<ProcedureDescriptor>(),
            any::<Payload>(),
        )
            .prop_map(|(subsystem, procedure, payload)| Self::new(subsystem, procedure, payload))
            .boxed()
    }
}
