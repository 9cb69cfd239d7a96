use arcus_protocol::{ArcSet, ParseResult, Sentence};
use tracing::{debug, trace};

use crate::configuration::Configuration;
use crate::error::TransitionError;
use crate::orphan::attach_orphans;
use crate::transition::TransitionSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// The driver gives up after `step_bound_factor * (len + 1)^2` transitions.
    pub step_bound_factor: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { step_bound_factor: 10 }
    }
}

impl DriverConfig {
    /// Step bound for a sentence of `len` tokens, root included.
    pub fn step_bound(&self, len: usize) -> usize {
        self.step_bound_factor.saturating_mul((len + 1).saturating_pow(2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StopReason {
    Terminal,
    /// The oracle proposed an action that changed nothing.
    Stalled,
    StepBound,
}

/// Raw result of driving one sentence, before orphan repair.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub arcs: ArcSet,
    pub steps: usize,
    pub stop: StopReason,
}

/// Runs the oracle of one transition system to completion on a sentence.
pub struct ParserDriver<'a> {
    system: &'a dyn TransitionSystem,
    config: DriverConfig,
}

impl<'a> ParserDriver<'a> {
    pub fn new(system: &'a dyn TransitionSystem, config: DriverConfig) -> Self {
        Self { system, config }
    }

    /// Applies oracle actions until the configuration is terminal, a step
    /// leaves it unchanged, or the step bound is reached.
    pub fn run(&self, sentence: &Sentence) -> Result<ParseOutcome, TransitionError> {
        let bound = self.config.step_bound(sentence.len());
        let mut config = Configuration::initial(sentence.len());
        let mut steps = 0;

        let stop = loop {
            if self.system.is_terminal(&config) {
                break StopReason::Terminal;
            }
            if steps >= bound {
                debug!(
                    sentence = %sentence.id,
                    system = %self.system.kind(),
                    bound,
                    "step bound reached"
                );
                break StopReason::StepBound;
            }

            let action = self.system.oracle(&config, sentence);
            let before = config.snapshot();
            self.system.apply(&mut config, &action)?;
            if config.snapshot() == before {
                debug!(
                    sentence = %sentence.id,
                    system = %self.system.kind(),
                    %action,
                    steps,
                    "parse stalled"
                );
                break StopReason::Stalled;
            }

            trace!(sentence = %sentence.id, step = steps, %action);
            steps += 1;
        };

        Ok(ParseOutcome { arcs: config.into_arcs(), steps, stop })
    }

    /// `run` followed by orphan repair: every non-root token ends with exactly one head.
    pub fn parse(
        &self,
        sentence: &Sentence,
    ) -> Result<(ParseResult, ParseOutcomeSummary), TransitionError> {
        let ParseOutcome { mut arcs, steps, stop } = self.run(sentence)?;
        let orphans = attach_orphans(&mut arcs, sentence.len());
        let summary = ParseOutcomeSummary { steps, stop, orphans };
        Ok((ParseResult::from_arcs(arcs, sentence.len()), summary))
    }
}

/// Bookkeeping that accompanies a repaired [`ParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOutcomeSummary {
    pub steps: usize,
    pub stop: StopReason,
    /// Tokens attached to the root by orphan repair.
    pub orphans: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{ArcEager, ArcStandard, SystemKind};
    use arcus_protocol::{Action, SentenceId, TokenId, TokenRecord};

    fn sentence(tokens: &[(&str, u32, &str)]) -> Sentence {
        let records = tokens
            .iter()
            .map(|&(word, head, label)| TokenRecord {
                word: word.to_string(),
                tag: "_".to_string(),
                head,
                label: label.to_string(),
            })
            .collect();
        Sentence::new(SentenceId(0), records).unwrap()
    }

    fn the_cat_sat() -> Sentence {
        sentence(&[("the", 2, "det"), ("cat", 3, "nsubj"), ("sat", 0, "root")])
    }

    #[test]
    fn test_step_bound_formula() {
        assert_eq!(DriverConfig::default().step_bound(4), 250);
        assert_eq!(DriverConfig { step_bound_factor: 0 }.step_bound(4), 0);
    }

    #[test]
    fn test_both_systems_reproduce_gold() {
        let s = the_cat_sat();
        for kind in SystemKind::ALL {
            let driver = ParserDriver::new(kind.system(), DriverConfig::default());
            let (result, summary) = driver.parse(&s).unwrap();

            assert_eq!(summary.stop, StopReason::Terminal, "{kind}");
            assert_eq!(summary.orphans, 0, "{kind}");
            for d in s.dependents() {
                assert_eq!(result.head(d), s.gold_head(d), "{kind} head of {d}");
                assert_eq!(result.label(d), s.gold_label(d), "{kind} label of {d}");
            }
        }
    }

    #[test]
    fn test_arc_standard_action_count() {
        let s = the_cat_sat();
        let outcome = ParserDriver::new(&ArcStandard, DriverConfig::default()).run(&s).unwrap();
        assert_eq!(outcome.steps, 2 * (s.len() - 1));
    }

    #[test]
    fn test_empty_sentence_is_already_terminal() {
        let s = sentence(&[]);
        for kind in SystemKind::ALL {
            let driver = ParserDriver::new(kind.system(), DriverConfig::default());
            let outcome = driver.run(&s).unwrap();
            assert_eq!(outcome.stop, StopReason::Terminal);
            assert_eq!(outcome.steps, 0);
        }
    }

    #[test]
    fn test_single_token_sentence() {
        let s = sentence(&[("hello", 0, "root")]);
        let eager = ParserDriver::new(&ArcEager, DriverConfig::default()).run(&s).unwrap();
        assert_eq!(eager.steps, 1);
        let standard = ParserDriver::new(&ArcStandard, DriverConfig::default()).run(&s).unwrap();
        assert_eq!(standard.steps, 2);
    }

    #[test]
    fn test_zero_step_bound_stops_and_orphans_repair() {
        let s = the_cat_sat();
        let driver = ParserDriver::new(&ArcEager, DriverConfig { step_bound_factor: 0 });
        let (result, summary) = driver.parse(&s).unwrap();

        assert_eq!(summary.stop, StopReason::StepBound);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.orphans, 3);
        for d in s.dependents() {
            assert_eq!(result.head(d), TokenId::ROOT);
            assert_eq!(result.label(d), "root");
        }
    }

    /// Oracle that keeps proposing SHIFT, which stops changing anything once
    /// the buffer is empty.
    struct ShiftForever;

    impl TransitionSystem for ShiftForever {
        fn kind(&self) -> SystemKind {
            SystemKind::ArcStandard
        }

        fn apply(
            &self,
            config: &mut Configuration,
            action: &Action,
        ) -> Result<bool, TransitionError> {
            ArcStandard.apply(config, action)
        }

        fn oracle(&self, _config: &Configuration, _sentence: &Sentence) -> Action {
            Action::Shift
        }

        fn is_terminal(&self, config: &Configuration) -> bool {
            ArcStandard.is_terminal(config)
        }
    }

    #[test]
    fn test_stall_is_detected() {
        let s = the_cat_sat();
        let driver = ParserDriver::new(&ShiftForever, DriverConfig::default());
        let (result, summary) = driver.parse(&s).unwrap();

        assert_eq!(summary.stop, StopReason::Stalled);
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.orphans, 3);
        assert_eq!(result.arcs.len(), 3);
    }
}
