use arcus_protocol::{Action, Arc, Sentence, TokenId};

use crate::configuration::Configuration;
use crate::error::TransitionError;
use crate::transition::{SystemKind, TransitionSystem};

/// Label used when the oracle has to force progress on a tree it cannot reproduce.
pub const FALLBACK_LABEL: &str = "dep";

/// Arc-standard: SHIFT, plus LEFT-ARC and RIGHT-ARC between the two topmost
/// stack elements. Terminal once the buffer is empty and one element is left.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcStandard;

impl ArcStandard {
    /// True while some unresolved token (stack below `s0`, or buffer) has
    /// `head` as its gold head.
    fn has_pending_dependents(config: &Configuration, sentence: &Sentence, head: TokenId) -> bool {
        config
            .stack()
            .skip(1)
            .chain(config.buffer())
            .any(|k| sentence.gold_head(k) == head)
    }
}

impl TransitionSystem for ArcStandard {
    fn kind(&self) -> SystemKind {
        SystemKind::ArcStandard
    }

    fn apply(&self, config: &mut Configuration, action: &Action) -> Result<bool, TransitionError> {
        let applied = match action {
            Action::Shift => config.shift(),
            // s1 -> s0, pop s0
            Action::LeftArc(label) => match (config.top(), config.second()) {
                (Some(s0), Some(s1)) => {
                    config.add_arc(Arc::new(s1, s0, label.as_str())) && config.pop().is_some()
                }
                _ => false,
            },
            // s0 -> s1, remove s1 and keep s0 on top
            Action::RightArc(label) => match (config.top(), config.second()) {
                (Some(s0), Some(s1)) => {
                    config.add_arc(Arc::new(s0, s1, label.as_str()))
                        && config.remove_second().is_some()
                }
                _ => false,
            },
            Action::Reduce => {
                return Err(TransitionError::UnsupportedAction {
                    system: self.kind(),
                    action: action.kind().name(),
                })
            }
        };
        Ok(applied)
    }

    fn oracle(&self, config: &Configuration, sentence: &Sentence) -> Action {
        let (Some(s0), Some(s1)) = (config.top(), config.second()) else {
            return Action::Shift;
        };

        if !s0.is_root()
            && sentence.gold_head(s0) == s1
            && !Self::has_pending_dependents(config, sentence, s0)
        {
            return Action::left_arc(sentence.gold_label(s0));
        }

        if !s1.is_root()
            && sentence.gold_head(s1) == s0
            && !Self::has_pending_dependents(config, sentence, s1)
        {
            return Action::right_arc(sentence.gold_label(s1));
        }

        if !config.buffer_is_empty() {
            return Action::Shift;
        }

        // Buffer exhausted with no gold move left: the gold tree is
        // non-projective or inconsistent. Force an attachment so the parse ends.
        let arcs = config.arcs();
        if !s1.is_root() && !arcs.has_head(s1) {
            return Action::right_arc(sentence.gold_label(s1));
        }
        if !s0.is_root() && !arcs.has_head(s0) {
            return Action::left_arc(sentence.gold_label(s0));
        }
        Action::right_arc(FALLBACK_LABEL)
    }

    fn is_terminal(&self, config: &Configuration) -> bool {
        config.buffer_is_empty() && config.stack_len() <= 1
    }
}
