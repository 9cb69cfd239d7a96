//! Applying a literal action sequence instead of asking an oracle.

use arcus_protocol::{Action, ParseResult};
use tracing::debug;

use crate::configuration::Configuration;
use crate::error::TransitionError;
use crate::orphan::attach_orphans;
use crate::transition::TransitionSystem;

#[derive(Debug, Clone)]
pub struct Replay {
    /// Configuration right after the last action, before orphan repair.
    pub config: Configuration,
    pub applied: usize,
    /// Positions in the input sequence whose preconditions did not hold.
    pub skipped: Vec<usize>,
}

impl Replay {
    /// Orphan-repairs the final arcs for a sentence of `len` tokens.
    pub fn into_result(self, len: usize) -> ParseResult {
        let mut arcs = self.config.into_arcs();
        attach_orphans(&mut arcs, len);
        ParseResult::from_arcs(arcs, len)
    }
}

/// Runs `actions` from the initial configuration of a `len`-token sentence.
pub fn replay(
    system: &dyn TransitionSystem,
    len: usize,
    actions: &[Action],
) -> Result<Replay, TransitionError> {
    let mut config = Configuration::initial(len);
    let mut applied = 0;
    let mut skipped = Vec::new();

    for (position, action) in actions.iter().enumerate() {
        if system.apply(&mut config, action)? {
            applied += 1;
        } else {
            debug!(position, %action, "precondition failed, action skipped");
            skipped.push(position);
        }
    }

    Ok(Replay { config, applied, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{ArcEager, ArcStandard};
    use arcus_protocol::{Arc, TokenId};

    const WORDS: [&str; 8] = ["root", "the", "cat", "is", "on", "the", "mat", "today"];

    fn actions(text: &str) -> Vec<Action> {
        text.split_whitespace().map(|a| a.parse().unwrap()).collect()
    }

    #[test]
    fn test_the_cat_is_on_the_mat_today() {
        let sequence = actions(
            "SHIFT LEFT-ARC(det) SHIFT LEFT-ARC(nsubj) SHIFT SHIFT SHIFT \
             LEFT-ARC(det) LEFT-ARC(case) RIGHT-ARC(nmod) REDUCE RIGHT-ARC(nmod)",
        );
        let run = replay(&ArcEager, WORDS.len(), &sequence).unwrap();

        assert_eq!(run.applied, 12);
        assert!(run.skipped.is_empty());
        assert!(run.config.buffer_is_empty());

        let arcs = run.config.arcs();
        let expected = [
            Arc::new(TokenId(2), TokenId(1), "det"),
            Arc::new(TokenId(3), TokenId(2), "nsubj"),
            Arc::new(TokenId(6), TokenId(5), "det"),
            Arc::new(TokenId(6), TokenId(4), "case"),
            Arc::new(TokenId(3), TokenId(6), "nmod"),
            Arc::new(TokenId(3), TokenId(7), "nmod"),
        ];
        assert_eq!(arcs.as_slice(), &expected);

        // "is" never receives a head from the sequence itself
        assert!(!arcs.has_head(TokenId(3)));

        let result = run.into_result(WORDS.len());
        assert_eq!(result.head(TokenId(3)), TokenId::ROOT);
        assert_eq!(result.label(TokenId(3)), "root");
        assert_eq!(result.arcs.len(), 7);
    }

    #[test]
    fn test_skipped_positions_are_reported() {
        let run = replay(&ArcEager, 2, &actions("SHIFT SHIFT LEFT-ARC(det)")).unwrap();
        assert_eq!(run.applied, 1);
        assert_eq!(run.skipped, vec![1, 2]);
    }

    #[test]
    fn test_unsupported_action_aborts_replay() {
        assert!(replay(&ArcStandard, 3, &actions("SHIFT REDUCE")).is_err());
    }
}
