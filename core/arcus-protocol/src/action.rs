use crate::error::ProtocolError;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Discriminant of an [`Action`], without its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum ActionKind {
    Shift,
    Reduce,
    LeftArc,
    RightArc,
}

impl ActionKind {
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Shift => "SHIFT",
            ActionKind::Reduce => "REDUCE",
            ActionKind::LeftArc => "LEFT-ARC",
            ActionKind::RightArc => "RIGHT-ARC",
        }
    }
}

/// A transition. Arc actions carry the label of the arc they create.
///
/// Which actions are meaningful depends on the transition system: arc-standard
/// has no `Reduce`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Action {
    Shift,
    Reduce,
    LeftArc(String),
    RightArc(String),
}

impl Action {
    pub fn left_arc(label: impl Into<String>) -> Self {
        Action::LeftArc(label.into())
    }

    pub fn right_arc(label: impl Into<String>) -> Self {
        Action::RightArc(label.into())
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Shift => ActionKind::Shift,
            Action::Reduce => ActionKind::Reduce,
            Action::LeftArc(_) => ActionKind::LeftArc,
            Action::RightArc(_) => ActionKind::RightArc,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Action::LeftArc(label) | Action::RightArc(label) => Some(label),
            Action::Shift | Action::Reduce => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}({})", self.kind().name(), label),
            None => f.write_str(self.kind().name()),
        }
    }
}

/// Accepts `SHIFT`, `REDUCE`, `LEFT-ARC(label)`, `RIGHT-ARC(label)` in any case,
/// and the short forms `SH`, `RE`, `LA(label)`, `RA(label)`.
impl FromStr for Action {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let unknown = || ProtocolError::UnknownAction(text.to_string());

        let (name, label) = match text.find('(') {
            Some(open) => {
                let inner = text[open + 1..].strip_suffix(')').ok_or_else(unknown)?;
                (&text[..open], Some(inner.trim()))
            }
            None => (text, None),
        };

        let name = name.trim().to_ascii_uppercase().replace('_', "-");
        match (name.as_str(), label) {
            ("SHIFT" | "SH", None) => Ok(Action::Shift),
            ("REDUCE" | "RE", None) => Ok(Action::Reduce),
            ("LEFT-ARC" | "LA", Some(label)) if !label.is_empty() => Ok(Action::left_arc(label)),
            ("RIGHT-ARC" | "RA", Some(label)) if !label.is_empty() => Ok(Action::right_arc(label)),
            _ => Err(unknown()),
        }
    }
}
