pub mod arc_eager;
pub mod arc_standard;

use std::fmt;
use std::str::FromStr;

use arcus_protocol::{Action, Sentence};

use crate::configuration::Configuration;
use crate::error::TransitionError;

pub use arc_eager::ArcEager;
pub use arc_standard::ArcStandard;

/// An action vocabulary with its effects, a terminal test and a static oracle.
pub trait TransitionSystem {
    fn kind(&self) -> SystemKind;

    /// Applies `action` in place.
    ///
    /// Returns `Ok(false)` and leaves `config` untouched when a precondition
    /// does not hold. Actions outside the vocabulary are an error.
    fn apply(&self, config: &mut Configuration, action: &Action) -> Result<bool, TransitionError>;

    /// The single correct next action with respect to the gold tree of `sentence`.
    fn oracle(&self, config: &Configuration, sentence: &Sentence) -> Action;

    fn is_terminal(&self, config: &Configuration) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SystemKind {
    #[default]
    ArcEager,
    ArcStandard,
}

impl SystemKind {
    pub const ALL: [SystemKind; 2] = [SystemKind::ArcEager, SystemKind::ArcStandard];

    pub const fn name(self) -> &'static str {
        match self {
            SystemKind::ArcEager => "arc-eager",
            SystemKind::ArcStandard => "arc-standard",
        }
    }

    pub fn system(self) -> &'static dyn TransitionSystem {
        match self {
            SystemKind::ArcEager => &ArcEager,
            SystemKind::ArcStandard => &ArcStandard,
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SystemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "arc-eager" => Ok(SystemKind::ArcEager),
            "arc-standard" => Ok(SystemKind::ArcStandard),
            other => Err(format!(
                "unknown transition system {other:?} (expected arc-eager or arc-standard)"
            )),
        }
    }
}
