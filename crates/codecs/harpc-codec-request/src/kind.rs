use core::fmt;

use serde::Serialize;

use crate::RequestBegin;

/// 请求协议的帧种类。
///
/// 目前只收录 Begin 帧；后续帧种类以新变体加入，因此标记为 `#[non_exhaustive]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum RequestFrame {
    /// 请求起始帧。
    Begin(RequestBegin),
}

impl RequestFrame {
    /// 帧种类名称。
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Begin(_) => "RequestBegin",
        }
    }

    /// 是否为 Begin 帧。
    #[must_use]
    pub fn is_request_begin(&self) -> bool {
        matches!(self, Self::Begin(_))
    }

    /// 借用 Begin 帧。
    #[must_use]
    pub fn as_request_begin(&self) -> Option<&RequestBegin> {
        match self {
            Self::Begin(begin) => Some(begin),
        }
    }

    /// 取出 Begin 帧。
    #[must_use]
    pub fn into_request_begin(self) -> Option<RequestBegin> {
        match self {
            Self::Begin(begin) => Some(begin),
        }
    }
}

impl From<RequestBegin> for RequestFrame {
    fn from(begin: RequestBegin) -> Self {
        Self::Begin(begin)
    }
}

impl fmt::Display for RequestFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(begin) => fmt::Display::fmt(begin, f),
        }
    }
}
