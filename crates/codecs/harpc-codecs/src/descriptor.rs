//! 定长描述符：子系统与过程。
//!
//! # 设计概览（Why）
//! - 两类描述符的线上形式都是固定宽度的字节串，编解码逻辑完全相同，只有字段布局不同；
//! - 因此抽出 [`Descriptor`] 契约，只要求实现者描述“如何写入/读出一段恰好 `WIDTH` 字节的切片”，
//!   游标交互集中在 [`encode_descriptor`]/[`decode_descriptor`] 两个泛型函数中。
//!
//! # 线上布局（What）
//! | 描述符 | 宽度 | 布局 |
//! |---|---|---|
//! | [`SubsystemDescriptor`] | 4 | id `u16` 大端、版本 major、版本 minor |
//! | [`ProcedureDescriptor`] | 2 | id `u16` 大端 |

use core::fmt;
use core::hash::Hash;

use harpc_buffer::CursorBuffer;
use serde::Serialize;

use crate::{CodecError, Decode, Encode};

/// 描述符线上宽度的上限，决定编码时栈上暂存区的大小。
pub const MAX_DESCRIPTOR_WIDTH: usize = 8;

/// 定长描述符契约。
///
/// # 契约说明（What）
/// - `WIDTH` 为编译期常量，且不超过 [`MAX_DESCRIPTOR_WIDTH`]（在泛型函数中以常量断言检查）；
/// - `write_wire` 收到的切片长度恰为 `WIDTH`，必须写满；
/// - `read_wire` 收到的切片长度恰为 `WIDTH`，对任意字节内容都必须成功；
/// - `read_wire(write_wire(x)) == x`。
pub trait Descriptor: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// 描述符种类名称；帧实现以它作为该字段的字段名，出现在 [`FrameError`](crate::FrameError) 与日志中。
    const KIND: &'static str;

    /// 线上宽度（字节）。
    const WIDTH: usize;

    /// 将自身写入长度为 `WIDTH` 的切片。
    fn write_wire(&self, wire: &mut [u8]);

    /// 从长度为 `WIDTH` 的切片还原描述符。
    fn read_wire(wire: &[u8]) -> Self;
}

/// 在游标处写入恰好 `D::WIDTH` 字节。
///
/// 仅在固定容量不足时失败（[`BufferError::Overflow`](harpc_buffer::BufferError::Overflow)），
/// 此时不写入任何字节。
pub fn encode_descriptor<D: Descriptor>(
    descriptor: &D,
    buffer: &mut CursorBuffer,
) -> Result<(), CodecError> {
    const { assert!(D::WIDTH <= MAX_DESCRIPTOR_WIDTH) };

    let mut scratch = [0u8; MAX_DESCRIPTOR_WIDTH];
    let wire = &mut scratch[..D::WIDTH];
    descriptor.write_wire(wire);
    buffer.write_bytes(wire)?;
    Ok(())
}

/// 从游标处读出恰好 `D::WIDTH` 字节并还原描述符。
///
/// 剩余字节不足时返回 [`BufferError::Underflow`](harpc_buffer::BufferError::Underflow)，游标不动。
pub fn decode_descriptor<D: Descriptor>(buffer: &mut CursorBuffer) -> Result<D, CodecError> {
    const { assert!(D::WIDTH <= MAX_DESCRIPTOR_WIDTH) };

    let wire = buffer.read_bytes(D::WIDTH)?;
    Ok(D::read_wire(wire))
}

/// 子系统标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SubsystemId(u16);

impl SubsystemId {
    /// 构造标识。
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// 原始数值。
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for SubsystemId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 子系统版本，先比较 major 再比较 minor。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    /// 主版本。
    pub major: u8,
    /// 次版本。
    pub minor: u8,
}

impl Version {
    /// 构造版本。
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// 子系统描述符：标识加版本。
///
/// 排序先按 id，再按版本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "_id", rename = "SubsystemDescriptor")]
pub struct SubsystemDescriptor {
    id: SubsystemId,
    version: Version,
}

impl SubsystemDescriptor {
    /// 构造描述符。
    #[must_use]
    pub const fn new(id: SubsystemId, version: Version) -> Self {
        Self { id, version }
    }

    /// 子系统标识。
    #[must_use]
    pub const fn id(&self) -> SubsystemId {
        self.id
    }

    /// 子系统版本。
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }
}

impl Descriptor for SubsystemDescriptor {
    const KIND: &'static str = "subsystem";
    const WIDTH: usize = 4;

    fn write_wire(&self, wire: &mut [u8]) {
        wire[..2].copy_from_slice(&self.id.get().to_be_bytes());
        wire[2] = self.version.major;
        wire[3] = self.version.minor;
    }

    fn read_wire(wire: &[u8]) -> Self {
        Self {
            id: SubsystemId(u16::from_be_bytes([wire[0], wire[1]])),
            version: Version::new(wire[2], wire[3]),
        }
    }
}

impl fmt::Display for SubsystemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubsystemDescriptor({}, v{})", self.id, self.version)
    }
}

/// 过程标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProcedureId(u16);

impl ProcedureId {
    /// 构造标识。
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// 原始数值。
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for ProcedureId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 过程描述符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "_id", rename = "ProcedureDescriptor")]
pub struct ProcedureDescriptor {
    id: ProcedureId,
}

impl ProcedureDescriptor {
    /// 构造描述符。
    #[must_use]
    pub const fn new(id: ProcedureId) -> Self {
        Self { id }
    }

    /// 过程标识。
    #[must_use]
    pub const fn id(&self) -> ProcedureId {
        self.id
    }
}

impl Descriptor for ProcedureDescriptor {
    const KIND: &'static str = "procedure";
    const WIDTH: usize = 2;

    fn write_wire(&self, wire: &mut [u8]) {
        wire.copy_from_slice(&self.id.get().to_be_bytes());
    }

    fn read_wire(wire: &[u8]) -> Self {
        Self {
            id: ProcedureId(u16::from_be_bytes([wire[0], wire[1]])),
        }
    }
}

impl fmt::Display for ProcedureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcedureDescriptor({})", self.id)
    }
}

macro_rules! impl_descriptor_codec {
    ($($descriptor:ty),+ $(,)?) => {
        $(
            impl Encode for $descriptor {
                fn encode(&self, buffer: &mut CursorBuffer) -> Result<(), CodecError> {
                    encode_descriptor(self, buffer)
                }

                fn encoded_len(&self) -> usize {
                    <$descriptor as Descriptor>::WIDTH
                }
            }

            impl Decode for $descriptor {
                fn decode(buffer: &mut CursorBuffer) -> Result<Self, CodecError> {
                    decode_descriptor(buffer)
                }
            }
        )+
    };
}

impl_descriptor_codec!(SubsystemDescriptor, ProcedureDescriptor);

#[cfg(any(test, feature = "proptest"))]
mod arbitrary {
    use proptest::prelude::*;
    use proptest::strategy::BoxedStrategy;

    use super::{ProcedureDescriptor, ProcedureId, SubsystemDescriptor, SubsystemId, Version};

    impl Arbitrary for SubsystemId {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<u16>().prop_map(Self).boxed()
        }
    }

    impl Arbitrary for Version {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (any::<u8>(), any::<u8>())
                .prop_map(|(major, minor)| Version::new(major, minor))
                .boxed()
        }
    }

    impl Arbitrary for SubsystemDescriptor {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            (any::<SubsystemId>(), any::<Version>())
                .prop_map(|(id, version)| SubsystemDescriptor::new(id, version))
                .boxed()
        }
    }

    impl Arbitrary for ProcedureId {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<u16>().prop_map(Self).boxed()
        }
    }

    impl Arbitrary for ProcedureDescriptor {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<ProcedureId>().prop_map(ProcedureDescriptor::new).boxed()
        }
    }
}
