//! Transition-based dependency parsing driven by static oracles.
//!
//! A [`Configuration`] is advanced by one of two [`TransitionSystem`]s
//! (arc-eager or arc-standard) whose oracle recovers the transition sequence
//! of a gold tree. The [`ParserDriver`] runs the oracle to completion and
//! [`attach_orphans`] makes the resulting tree total.

pub mod configuration;
pub mod driver;
pub mod error;
pub mod orphan;
pub mod replay;
pub mod tab;
pub mod transition;

pub use configuration::{Configuration, Snapshot};
pub use driver::{DriverConfig, ParseOutcome, ParseOutcomeSummary, ParserDriver, StopReason};
pub use error::{LoadError, RecordError, TransitionError};
pub use orphan::attach_orphans;
pub use replay::{replay, Replay};
pub use transition::{ArcEager, ArcStandard, SystemKind, TransitionSystem};
