pub mod evaluator;
pub mod shape;
pub mod tree;

pub use evaluator::{AttachmentScore, EvalConfig, EvalReport, Evaluator, Mismatch, SentenceEval};
pub use shape::TreeShape;
pub use tree::DependencyTree;
