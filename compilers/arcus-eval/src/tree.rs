use std::fmt;

use arcus_protocol::{ParseResult, Sentence, TokenId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// Predicted arcs of a sentence indexed by head, for depth-first printing.
pub struct DependencyTree<'a> {
    sentence: &'a Sentence,
    graph: DiGraph<TokenId, String>,
}

impl<'a> DependencyTree<'a> {
    pub fn from_result(sentence: &'a Sentence, result: &ParseResult) -> Self {
        let mut graph = DiGraph::with_capacity(sentence.len(), result.arcs.len());
        for index in 0..sentence.len() {
            graph.add_node(TokenId::from_index(index));
        }
        for arc in result.arcs.iter() {
            if arc.head.index() < sentence.len() && arc.dependent.index() < sentence.len() {
                graph.add_edge(
                    NodeIndex::new(arc.head.index()),
                    NodeIndex::new(arc.dependent.index()),
                    arc.label.clone(),
                );
            }
        }
        Self { sentence, graph }
    }

    /// Children of `head` ordered by dependent position, then label.
    fn children(&self, head: TokenId) -> Vec<(TokenId, &str)> {
        let mut children: Vec<(TokenId, &str)> = self
            .graph
            .edges(NodeIndex::new(head.index()))
            .map(|edge| (self.graph[edge.target()], edge.weight().as_str()))
            .collect();
        children.sort();
        children
    }

    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        head: TokenId,
        indent: &mut String,
        visited: &mut [bool],
    ) -> fmt::Result {
        visited[head.index()] = true;
        for (dependent, label) in self.children(head) {
            writeln!(
                f,
                "{indent}{label}({}_{}, {}_{})",
                self.sentence.word(head),
                head,
                self.sentence.word(dependent),
                dependent
            )?;
            if !visited[dependent.index()] {
                indent.push_str("  ");
                self.write_subtree(f, dependent, indent, visited)?;
                indent.truncate(indent.len() - 2);
            }
        }
        Ok(())
    }
}

/// First line is the sentence text, then one `label(head_i, dep_j)` line per
/// arc, indented two spaces per level below the root.
impl fmt::Display for DependencyTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sentence.text())?;
        let mut visited = vec![false; self.sentence.len()];
        self.write_subtree(f, TokenId::ROOT, &mut String::new(), &mut visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcus_protocol::{Arc, ArcSet, SentenceId, TokenRecord};

    fn words(text: &str) -> Sentence {
        let records = text
            .split_whitespace()
            .map(|w| TokenRecord { word: w.into(), tag: "_".into(), head: 0, label: "_".into() })
            .collect();
        Sentence::new(SentenceId(0), records).unwrap()
    }

    #[test]
    fn test_render_nested_tree() {
        let sentence = words("the cat sat");
        let mut arcs = ArcSet::new();
        arcs.push(Arc::new(TokenId(3), TokenId(2), "nsubj"));
        arcs.push(Arc::new(TokenId(2), TokenId(1), "det"));
        arcs.push(Arc::new(TokenId::ROOT, TokenId(3), "root"));
        let result = ParseResult::from_arcs(arcs, sentence.len());

        let rendered = DependencyTree::from_result(&sentence, &result).to_string();
        assert_eq!(
            rendered,
            "the cat sat\n\
             root(root_0, sat_3)\n\
             \x20 nsubj(sat_3, cat_2)\n\
             \x20   det(cat_2, the_1)\n"
        );
    }

    #[test]
    fn test_siblings_sorted_by_position() {
        let sentence = words("a b c");
        let mut arcs = ArcSet::new();
        arcs.push(Arc::new(TokenId::ROOT, TokenId(3), "root"));
        arcs.push(Arc::new(TokenId::ROOT, TokenId(1), "root"));
        arcs.push(Arc::new(TokenId::ROOT, TokenId(2), "root"));
        let result = ParseResult::from_arcs(arcs, sentence.len());

        let rendered = DependencyTree::from_result(&sentence, &result).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1..], ["root(root_0, a_1)", "root(root_0, b_2)", "root(root_0, c_3)"]);
    }

    #[test]
    fn test_cycle_through_root_terminates() {
        let sentence = words("a");
        let mut arcs = ArcSet::new();
        arcs.push(Arc::new(TokenId::ROOT, TokenId(1), "root"));
        arcs.push(Arc::new(TokenId(1), TokenId::ROOT, "dep"));
        let result = ParseResult::from_arcs(arcs, sentence.len());

        let rendered = DependencyTree::from_result(&sentence, &result).to_string();
        assert_eq!(rendered, "a\nroot(root_0, a_1)\n  dep(a_1, root_0)\n");
    }
}
