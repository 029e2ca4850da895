//! 编码暂存缓冲的容量配置。
//!
//! # 使用方式（How）
//! ```
//! use harpc_codecs::{Capacity, CodecLimits};
//!
//! let limits = CodecLimits::from_toml_str("max_frame_size = 1024")?;
//! assert_eq!(limits.capacity(), Capacity::Fixed(1024));
//! assert_eq!(limits.initial_capacity, CodecLimits::DEFAULT_INITIAL_CAPACITY);
//! # Ok::<(), harpc_codecs::LimitsError>(())
//! ```

use harpc_buffer::{Capacity, CursorBuffer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 编码暂存缓冲的容量策略。
///
/// # 契约（What）
/// - `max_frame_size` 为 `Some(n)` 时暂存缓冲为固定容量 `n`，超出即 `Overflow`；为 `None` 时可增长；
/// - `initial_capacity` 只影响预分配，不改变语义；
/// - 缺省字段取 [`Default`] 中的值，未知字段视为配置错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecLimits {
    /// 单帧编码后的最大字节数。
    pub max_frame_size: Option<usize>,
    /// 暂存缓冲的预分配字节数。
    pub initial_capacity: usize,
}

impl CodecLimits {
    /// 默认预分配：足以容纳请求头与短负载。
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

    /// 从 TOML 表解析并校验。
    pub fn from_toml_str(source: &str) -> Result<Self, LimitsError> {
        let limits: Self = toml::from_str(source)?;
        limits.validate()?;
        Ok(limits)
    }

    /// 拒绝无法容纳任何帧的配置。
    pub fn validate(&self) -> Result<(), LimitsError> {
        match self.max_frame_size {
            Some(0) => Err(LimitsError::ZeroFrameSize),
            _ => Ok(()),
        }
    }

    /// 对应的缓冲容量策略。
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        match self.max_frame_size {
            Some(limit) => Capacity::Fixed(limit),
            None => Capacity::Growable,
        }
    }

    /// 按本配置创建写模式的暂存缓冲。
    #[must_use]
    pub fn scratch_buffer(&self) -> CursorBuffer {
        let mut buffer = CursorBuffer::writer(self.capacity());
        buffer.reserve(self.initial_capacity);
        buffer
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_frame_size: None,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// 配置加载失败。
#[derive(Debug, Error)]
pub enum LimitsError {
    /// TOML 语法或字段类型错误。
    #[error("invalid codec limits: {0}")]
    Parse(#[from] toml::de::Error),
    /// `max_frame_size = 0`。
    #[error("max_frame_size must be greater than zero")]
    ZeroFrameSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_uses_defaults() {
        let limits = CodecLimits::from_toml_str("").expect("defaults");
        assert_eq!(limits, CodecLimits::default());
        assert_eq!(limits.capacity(), Capacity::Growable);
    }

    #[test]
    fn fixed_limit_bounds_scratch_buffer() {
        let limits = CodecLimits::from_toml_str("max_frame_size = 4\ninitial_capacity = 16")
            .expect("parse");
        let mut scratch = limits.scratch_buffer();
        assert_eq!(scratch.capacity(), Capacity::Fixed(4));
        assert!(scratch.write_bytes(&[0; 5]).is_err());
        assert!(scratch.write_bytes(&[0; 4]).is_ok());
    }

    #[test]
    fn rejects_zero_and_unknown_fields() {
        assert!(matches!(
            CodecLimits::from_toml_str("max_frame_size = 0"),
            Err(LimitsError::ZeroFrameSize)
        ));
        assert!(matches!(
            CodecLimits::from_toml_str("max_frame = 10"),
            Err(LimitsError::Parse(_))
        ));
    }
}
