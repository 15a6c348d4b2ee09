//! The closed set of page lifecycle operations forwarded across the bridge.

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// A named lifecycle operation the host forwards to the embedded runtime.
///
/// Each variant maps to exactly one wire method name and one fixed,
/// ordered list of envelope fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    OnNativePageResult,
    DidShowPageContainer,
    WillShowPageContainer,
    WillDisappearPageContainer,
    DidDisappearPageContainer,
    DidInitPageContainer,
    WillDeallocPageContainer,
}

const PAGE_RESULT_FIELDS: &[&str] = &["uniqueId", "key", "resultData", "params"];
const PAGE_EVENT_FIELDS: &[&str] = &["pageName", "params", "uniqueId"];

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 7] = [
        Operation::OnNativePageResult,
        Operation::DidShowPageContainer,
        Operation::WillShowPageContainer,
        Operation::WillDisappearPageContainer,
        Operation::DidDisappearPageContainer,
        Operation::DidInitPageContainer,
        Operation::WillDeallocPageContainer,
    ];

    /// The method name sent over the channel.
    pub const fn method_name(self) -> &'static str {
        match self {
            Operation::OnNativePageResult => "onNativePageResult",
            Operation::DidShowPageContainer => "didShowPageContainer",
            Operation::WillShowPageContainer => "willShowPageContainer",
            Operation::WillDisappearPageContainer => "willDisappearPageContainer",
            Operation::DidDisappearPageContainer => "didDisappearPageContainer",
            Operation::DidInitPageContainer => "didInitPageContainer",
            Operation::WillDeallocPageContainer => "willDeallocPageContainer",
        }
    }

    /// The envelope fields for this operation, in wire order.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Operation::OnNativePageResult => PAGE_RESULT_FIELDS,
            _ => PAGE_EVENT_FIELDS,
        }
    }

    /// Whether this is one of the six page container events
    /// (`pageName`, `params`, `uniqueId`).
    pub const fn is_page_event(self) -> bool {
        !matches!(self, Operation::OnNativePageResult)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.method_name() == s)
            .ok_or_else(|| BridgeError::unknown_operation(s))
    }
}
