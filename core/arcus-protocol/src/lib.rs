#![no_std] // Parser state machines only need alloc

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod action;
pub mod arc;
pub mod error;
pub mod ids;

// Re-export core types for convenience
pub use action::{Action, ActionKind};
pub use arc::{Arc, ArcSet};
pub use error::ProtocolError;
pub use ids::{SentenceId, TokenId};

pub mod model;
pub use model::*;
