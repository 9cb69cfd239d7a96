use thiserror::Error;

use crate::transition::SystemKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The action is outside the system's vocabulary. This is a bug in the
    /// caller, never a property of the data.
    #[error("{system} has no {action} transition")]
    UnsupportedAction { system: SystemKind, action: &'static str },
}

/// Why a single treebank line could not become a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 4 tab-separated fields, found {0}")]
    TooFewFields(usize),
    #[error("head {0:?} is not a non-negative integer")]
    InvalidHead(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read treebank: {0}")]
    Io(#[from] std::io::Error),
}
