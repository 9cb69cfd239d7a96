use arcus_protocol::Sentence;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Structural facts about the gold annotation of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeShape {
    /// Tokens whose gold head is the root.
    pub roots: usize,
    pub cyclic: bool,
    pub projective: bool,
}

impl TreeShape {
    pub fn analyze(sentence: &Sentence) -> Self {
        let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(sentence.len(), sentence.len());
        let nodes: Vec<NodeIndex> = (0..sentence.len()).map(|_| graph.add_node(())).collect();

        let mut roots = 0;
        for d in sentence.dependents() {
            let head = sentence.gold_head(d);
            if head.is_root() {
                roots += 1;
            }
            graph.add_edge(nodes[head.index()], nodes[d.index()], ());
        }

        Self {
            roots,
            cyclic: is_cyclic_directed(&graph),
            projective: sentence.is_projective(),
        }
    }

    /// Single root and no cycle.
    pub fn is_tree(&self) -> bool {
        self.roots == 1 && !self.cyclic
    }
}
