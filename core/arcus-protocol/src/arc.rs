use crate::ids::TokenId;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A labelled dependency `head -> dependent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Arc {
    pub head: TokenId,
    pub dependent: TokenId,
    pub label: String,
}

impl Arc {
    pub fn new(head: TokenId, dependent: TokenId, label: impl Into<String>) -> Self {
        Self { head, dependent, label: label.into() }
    }
}

/// Append-only arc collection in which every dependent has at most one head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArcSet {
    arcs: Vec<Arc>,
}

impl ArcSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `arc` unless its dependent already has a head. Returns whether it was added.
    pub fn push(&mut self, arc: Arc) -> bool {
        if self.has_head(arc.dependent) {
            return false;
        }
        self.arcs.push(arc);
        true
    }

    pub fn has_head(&self, dependent: TokenId) -> bool {
        self.arcs.iter().any(|a| a.dependent == dependent)
    }

    pub fn head_of(&self, dependent: TokenId) -> Option<&Arc> {
        self.arcs.iter().find(|a| a.dependent == dependent)
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Arcs in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Arc> {
        self.arcs.iter()
    }

    pub fn as_slice(&self) -> &[Arc] {
        &self.arcs
    }
}

impl<'a> IntoIterator for &'a ArcSet {
    type Item = &'a Arc;
    type IntoIter = core::slice::Iter<'a, Arc>;

    fn into_iter(self) -> Self::IntoIter {
        self.arcs.iter()
    }
}
