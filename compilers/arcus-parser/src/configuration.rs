use std::collections::VecDeque;

use arcus_protocol::{Arc, ArcSet, TokenId};

/// Parse state of one sentence: stack, buffer and the arcs built so far.
///
/// The stack top and the buffer front are the positions transitions act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    // Top of the stack is the last element.
    stack: Vec<TokenId>,
    buffer: VecDeque<TokenId>,
    arcs: ArcSet,
}

/// Observable state used by the driver to detect a transition that changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    stack: Vec<TokenId>,
    buffer: Vec<TokenId>,
    arcs: usize,
}

impl Configuration {
    /// `stack = [root]`, `buffer = [1 .. len)`, no arcs.
    pub fn initial(len: usize) -> Self {
        Self {
            stack: vec![TokenId::ROOT],
            buffer: (1..len).map(TokenId::from_index).collect(),
            arcs: ArcSet::new(),
        }
    }

    /// `stack[0]`.
    pub fn top(&self) -> Option<TokenId> {
        self.stack.last().copied()
    }

    /// `stack[1]`, the element directly below the top.
    pub fn second(&self) -> Option<TokenId> {
        self.stack.len().checked_sub(2).map(|i| self.stack[i])
    }

    /// Front of the buffer.
    pub fn next(&self) -> Option<TokenId> {
        self.buffer.front().copied()
    }

    /// Stack contents, top first.
    pub fn stack(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Buffer contents, front first.
    pub fn buffer(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.buffer.iter().copied()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn buffer_is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn arcs(&self) -> &ArcSet {
        &self.arcs
    }

    pub fn into_arcs(self) -> ArcSet {
        self.arcs
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stack: self.stack.clone(),
            buffer: self.buffer.iter().copied().collect(),
            arcs: self.arcs.len(),
        }
    }

    /// Moves the buffer front onto the stack.
    pub fn shift(&mut self) -> bool {
        match self.buffer.pop_front() {
            Some(next) => {
                self.stack.push(next);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the stack top.
    pub fn pop(&mut self) -> Option<TokenId> {
        self.stack.pop()
    }

    /// Removes and returns the element below the top, leaving the top in place.
    pub fn remove_second(&mut self) -> Option<TokenId> {
        let i = self.stack.len().checked_sub(2)?;
        Some(self.stack.remove(i))
    }

    /// Records an arc. Refused (returns false) when the dependent already has a head.
    pub fn add_arc(&mut self, arc: Arc) -> bool {
        self.arcs.push(arc)
    }
}
