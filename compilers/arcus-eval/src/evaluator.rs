use std::fmt;

use arcus_parser::{DriverConfig, ParserDriver, StopReason, SystemKind, TransitionError};
use arcus_protocol::{ParseResult, Sentence, SentenceId, TokenId, Treebank};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::shape::TreeShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub system: SystemKind,
    /// Maximum number of mismatches kept as printable examples.
    pub show: usize,
    pub driver: DriverConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            system: SystemKind::ArcEager,
            show: 5,
            driver: DriverConfig::default(),
        }
    }
}

/// Attachment counts. Label matches are only counted on tokens whose head matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttachmentScore {
    pub total: usize,
    pub head_matches: usize,
    pub label_matches: usize,
}

impl AttachmentScore {
    pub fn uas(&self) -> f64 {
        ratio(self.head_matches, self.total)
    }

    pub fn las(&self) -> f64 {
        ratio(self.label_matches, self.total)
    }

    pub fn merge(&mut self, other: &AttachmentScore) {
        self.total += other.total;
        self.head_matches += other.head_matches;
        self.label_matches += other.label_matches;
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// A token whose predicted head differs from its gold head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub sentence: SentenceId,
    pub text: String,
    pub token: TokenId,
    pub word: String,
    pub gold_head: TokenId,
    pub gold_label: String,
    pub pred_head: TokenId,
    pub pred_label: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mismatch:")?;
        writeln!(f, "  sent: {}", self.text)?;
        writeln!(f, "  token: {}\t{}", self.token, self.word)?;
        writeln!(f, "  gold:  head={} label={}", self.gold_head, self.gold_label)?;
        writeln!(f, "  pred:  head={} label={}", self.pred_head, self.pred_label)
    }
}

#[derive(Debug, Clone)]
pub struct SentenceEval {
    pub result: ParseResult,
    pub score: AttachmentScore,
    pub mismatches: Vec<Mismatch>,
    pub stop: StopReason,
    pub orphans: usize,
    pub shape: TreeShape,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvalReport {
    pub system: SystemKind,
    pub sentences: usize,
    pub score: AttachmentScore,
    pub uas: f64,
    pub las: f64,
    /// Head mismatches across the whole treebank.
    pub mismatches: usize,
    /// The first `show` mismatches.
    pub examples: Vec<Mismatch>,
    pub stalled: usize,
    pub step_bound_hits: usize,
    pub orphans: usize,
    pub non_projective: usize,
    pub malformed: usize,
}

/// Mismatch examples, then the aggregate lines.
impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for example in &self.examples {
            writeln!(f, "{example}")?;
        }
        let score = &self.score;
        writeln!(f, "System: {}", self.system)?;
        writeln!(f, "Tokens: {}", score.total)?;
        writeln!(f, "UAS: {:.4} ({}/{})", score.uas(), score.head_matches, score.total)?;
        writeln!(f, "LAS: {:.4} ({}/{})", score.las(), score.label_matches, score.total)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    fn driver(&self) -> ParserDriver<'static> {
        ParserDriver::new(self.config.system.system(), self.config.driver)
    }

    /// Oracle-parses `sentence`, repairs orphans and scores every non-root token.
    pub fn evaluate_sentence(&self, sentence: &Sentence) -> Result<SentenceEval, TransitionError> {
        Self::score_with(&self.driver(), sentence)
    }

    fn score_with(
        driver: &ParserDriver<'_>,
        sentence: &Sentence,
    ) -> Result<SentenceEval, TransitionError> {
        let shape = TreeShape::analyze(sentence);
        if !shape.projective || !shape.is_tree() {
            debug!(sentence = %sentence.id, ?shape, "gold tree is not a projective tree");
        }

        let (result, summary) = driver.parse(sentence)?;

        let mut score = AttachmentScore::default();
        let mut mismatches = Vec::new();
        for id in sentence.dependents() {
            score.total += 1;
            if result.head(id) == sentence.gold_head(id) {
                score.head_matches += 1;
                if result.label(id) == sentence.gold_label(id) {
                    score.label_matches += 1;
                }
            } else {
                mismatches.push(Mismatch {
                    sentence: sentence.id,
                    text: sentence.text(),
                    token: id,
                    word: sentence.word(id).to_string(),
                    gold_head: sentence.gold_head(id),
                    gold_label: sentence.gold_label(id).to_string(),
                    pred_head: result.head(id),
                    pred_label: result.label(id).to_string(),
                });
            }
        }

        Ok(SentenceEval {
            result,
            score,
            mismatches,
            stop: summary.stop,
            orphans: summary.orphans,
            shape,
        })
    }

    pub fn evaluate(&self, treebank: &Treebank) -> Result<EvalReport, TransitionError> {
        let driver = self.driver();
        let mut report = EvalReport {
            system: self.config.system,
            ..EvalReport::default()
        };

        for sentence in &treebank.sentences {
            let eval = Self::score_with(&driver, sentence)?;

            report.sentences += 1;
            report.score.merge(&eval.score);
            report.mismatches += eval.mismatches.len();
            report.orphans += eval.orphans;
            match eval.stop {
                StopReason::Terminal => {}
                StopReason::Stalled => report.stalled += 1,
                StopReason::StepBound => report.step_bound_hits += 1,
            }
            if !eval.shape.projective {
                report.non_projective += 1;
            }
            if !eval.shape.is_tree() {
                report.malformed += 1;
            }

            let room = self.config.show.saturating_sub(report.examples.len());
            report.examples.extend(eval.mismatches.into_iter().take(room));
        }

        report.uas = report.score.uas();
        report.las = report.score.las();
        info!(
            system = %report.system,
            sentences = report.sentences,
            tokens = report.score.total,
            uas = report.uas,
            las = report.las,
            "evaluation finished"
        );
        Ok(report)
    }
}
