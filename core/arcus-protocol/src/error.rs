use alloc::string::String;
use core::fmt;

use crate::ids::TokenId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A gold head points outside the sentence.
    HeadOutOfRange { token: TokenId, head: u32, len: usize },
    /// Text that does not name one of the four transitions.
    UnknownAction(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::HeadOutOfRange { token, head, len } => write!(
                f,
                "token {} has gold head {} outside sentence of length {}",
                token, head, len
            ),
            ProtocolError::UnknownAction(text) => write!(f, "unknown action: {:?}", text),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}
