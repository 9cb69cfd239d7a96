use arcus_protocol::{Action, Arc, Sentence};

use crate::configuration::Configuration;
use crate::error::TransitionError;
use crate::transition::{SystemKind, TransitionSystem};

/// Arc-eager: SHIFT, REDUCE, RIGHT-ARC and LEFT-ARC between the stack top
/// and the buffer front. Terminal once the buffer is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcEager;

impl TransitionSystem for ArcEager {
    fn kind(&self) -> SystemKind {
        SystemKind::ArcEager
    }

    fn apply(&self, config: &mut Configuration, action: &Action) -> Result<bool, TransitionError> {
        let applied = match action {
            Action::Shift => config.shift(),
            Action::Reduce => config.pop().is_some(),
            Action::RightArc(label) => match (config.top(), config.next()) {
                (Some(top), Some(next)) => {
                    config.add_arc(Arc::new(top, next, label.as_str())) && config.shift()
                }
                _ => false,
            },
            Action::LeftArc(label) => match (config.top(), config.next()) {
                (Some(top), Some(next)) => {
                    config.add_arc(Arc::new(next, top, label.as_str())) && config.pop().is_some()
                }
                _ => false,
            },
        };
        Ok(applied)
    }

    /// Static oracle (Goldberg & Nivre). Priority is LEFT-ARC, RIGHT-ARC,
    /// REDUCE, SHIFT; reordering breaks gold reproduction.
    fn oracle(&self, config: &Configuration, sentence: &Sentence) -> Action {
        let Some(next) = config.next() else {
            return Action::Reduce;
        };
        let Some(top) = config.top() else {
            return Action::Shift;
        };
        let arcs = config.arcs();

        if !top.is_root() && sentence.gold_head(top) == next && !arcs.has_head(top) {
            return Action::left_arc(sentence.gold_label(top));
        }

        if sentence.gold_head(next) == top && !arcs.has_head(next) {
            return Action::right_arc(sentence.gold_label(next));
        }

        if !top.is_root()
            && arcs.has_head(top)
            && config.buffer().all(|k| sentence.gold_head(k) != top)
        {
            return Action::Reduce;
        }

        Action::Shift
    }

    fn is_terminal(&self, config: &Configuration) -> bool {
        config.buffer_is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcus_protocol::TokenId;

    #[test]
    fn test_illegal_actions_are_noops() {
        let mut config = Configuration::initial(1);
        let before = config.clone();

        assert_eq!(ArcEager.apply(&mut config, &Action::Shift), Ok(false));
        assert_eq!(ArcEager.apply(&mut config, &Action::left_arc("det")), Ok(false));
        assert_eq!(ArcEager.apply(&mut config, &Action::right_arc("det")), Ok(false));
        assert_eq!(config, before);
    }

    #[test]
    fn test_left_arc_refuses_second_head() {
        // root -> 1 via RIGHT-ARC, then LEFT-ARC would give 1 another head
        let mut config = Configuration::initial(3);
        assert_eq!(ArcEager.apply(&mut config, &Action::right_arc("root")), Ok(true));
        let before = config.clone();

        assert_eq!(ArcEager.apply(&mut config, &Action::left_arc("dep")), Ok(false));
        assert_eq!(config, before);
    }

    #[test]
    fn test_reduce_pops_without_arc() {
        let mut config = Configuration::initial(2);
        assert_eq!(ArcEager.apply(&mut config, &Action::Reduce), Ok(true));
        assert_eq!(config.top(), None);
        assert!(config.arcs().is_empty());
        assert_eq!(ArcEager.apply(&mut config, &Action::Reduce), Ok(false));
    }

    #[test]
    fn test_arc_directions() {
        let mut config = Configuration::initial(4);
        ArcEager.apply(&mut config, &Action::Shift).unwrap();
        // top = 1, next = 2
        ArcEager.apply(&mut config, &Action::left_arc("det")).unwrap();
        assert_eq!(config.arcs().head_of(TokenId(1)).map(|a| a.head), Some(TokenId(2)));
        assert_eq!(config.top(), Some(TokenId::ROOT));

        // top = root, next = 2
        ArcEager.apply(&mut config, &Action::right_arc("root")).unwrap();
        assert_eq!(config.arcs().head_of(TokenId(2)).map(|a| a.head), Some(TokenId::ROOT));
        assert_eq!(config.top(), Some(TokenId(2)));
        assert_eq!(config.next(), Some(TokenId(3)));
    }
}
