//! 自描述长度的负载字段。
//!
//! 线上形式：`u16` 大端长度前缀，随后恰好该长度的字节。
//! 对组合它的帧而言负载是“全有或全无”的：解码失败时游标退回到长度前缀之前。

use core::fmt;

use bytes::Bytes;
use harpc_buffer::CursorBuffer;
use serde::{Serialize, Serializer};

use crate::{CodecError, Decode, Encode};

/// 日志/展示时最多输出的字节数，超出部分以总长度代替。
const DISPLAY_LIMIT: usize = 32;

/// 不可变的负载字节。
///
/// # 契约（What）
/// - 构造不做长度校验，超过 [`Payload::MAX_SIZE`] 的负载在编码时以
///   [`CodecError::PayloadTooLarge`] 失败；
/// - 相等与哈希按字节内容计算。
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "_id", rename = "Payload")]
pub struct Payload {
    #[serde(serialize_with = "serialize_hex")]
    bytes: Bytes,
}

impl Payload {
    /// 单个负载的最大字节数：64 KiB 减去请求头预留的 32 字节。
    pub const MAX_SIZE: usize = 64 * 1024 - 32;

    /// 长度前缀的宽度。
    pub const LENGTH_PREFIX: usize = 2;

    /// 包装字节。
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// 零拷贝包装静态字节。
    #[must_use]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    /// 负载内容。
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 负载字节数（不含长度前缀）。
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 是否为空负载。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 取出底层 `Bytes`。
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    fn length_prefix(&self) -> Result<[u8; Self::LENGTH_PREFIX], CodecError> {
        let len = self.len();
        if len > Self::MAX_SIZE {
            return Err(too_large(len));
        }
        let prefix = u16::try_from(len).map_err(|_| too_large(len))?;
        Ok(prefix.to_be_bytes())
    }

    fn read_framed(buffer: &mut CursorBuffer) -> Result<Self, CodecError> {
        let len = usize::from(u16::from_be_bytes(buffer.read_array()?));
        if len > Self::MAX_SIZE {
            return Err(too_large(len));
        }
        let bytes = Bytes::copy_from_slice(buffer.read_bytes(len)?);
        Ok(Self { bytes })
    }
}

fn too_large(len: usize) -> CodecError {
    CodecError::PayloadTooLarge {
        len,
        max: Payload::MAX_SIZE,
    }
}

fn serialize_hex<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl Encode for Payload {
    fn encode(&self, buffer: &mut CursorBuffer) -> Result<(), CodecError> {
        buffer.write_bytes(&self.length_prefix()?)?;
        buffer.write_bytes(&self.bytes)?;
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        Self::LENGTH_PREFIX + self.len()
    }
}

impl Decode for Payload {
    fn decode(buffer: &mut CursorBuffer) -> Result<Self, CodecError> {
        let start = buffer.position();
        match Self::read_framed(buffer) {
            Ok(payload) => Ok(payload),
            Err(err) => {
                buffer.rewind(start)?;
                Err(err)
            }
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&'static [u8]> for Payload {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_static(bytes)
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() <= DISPLAY_LIMIT {
            write!(f, "Payload({})", hex::encode(&self.bytes))
        } else {
            write!(
                f,
                "Payload({}..., {} bytes)",
                hex::encode(&self.bytes[..DISPLAY_LIMIT]),
                self.len()
            )
        }
    }
}

#[cfg(any(test, feature = "proptest"))]
mod arbitrary {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest::strategy::BoxedStrategy;

    use super::Payload;

    impl Arbitrary for Payload {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            vec(any::<u8>(), 0..256).prop_map(Payload::from).boxed()
        }
    }
}
