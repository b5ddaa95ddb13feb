//! Path search over the import graph
//!
//! Depth-first search that never revisits a node already on the current
//! branch. That is what bounds the search on cyclic graphs. There is no
//! memoization of failed branches, so the worst case walks every simple path.

use std::collections::HashSet;

use super::{ImportGraph, NodeId};

/// Nodes the search must not enter
pub type ExclusionSet = HashSet<NodeId>;

/// Ordered chain of nodes from a start node to an end node, both inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPath {
    nodes: Vec<NodeId>,
}

impl ImportPath {
    pub(super) fn from_reversed(mut nodes: Vec<NodeId>) -> Self {
        nodes.reverse();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of nodes on the path (a path never has zero)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Labels along the path
    pub fn labels<'g>(&self, graph: &'g ImportGraph) -> Vec<&'g str> {
        self.nodes.iter().map(|&id| graph.label(id)).collect()
    }
}

/// Returns the path goal-first, or `None` when unreachable
///
/// `excluded` holds the current branch. `from` is added before descending and
/// removed on the way back out, so sibling branches never see each other's
/// exclusions.
pub(super) fn search(
    graph: &ImportGraph,
    from: NodeId,
    to: NodeId,
    excluded: &mut ExclusionSet,
) -> Option<Vec<NodeId>> {
    if excluded.contains(&from) || excluded.contains(&to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }
    if graph.has_edge(from, to) {
        return Some(vec![to, from]);
    }

    excluded.insert(from);
    let mut found = None;
    for &next in graph.edges(from) {
        if excluded.contains(&next) {
            continue;
        }
        if let Some(mut path) = search(graph, next, to, excluded) {
            path.push(from);
            found = Some(path);
            break;
        }
    }
    excluded.remove(&from);

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(graph: &ImportGraph, from: &str, to: &str) -> Option<Vec<String>> {
        let from = graph.get(from)?;
        let to = graph.get(to)?;
        graph.find_path(from, to).map(|p| {
            p.labels(graph)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    #[test]
    fn test_trivial_path() {
        let mut graph = ImportGraph::new();
        let a = graph.node("a");
        let path = graph.find_path(a, a).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.start(), a);
        assert_eq!(path.end(), a);
    }

    #[test]
    fn test_direct_edge_short_circuits() {
        let mut graph = ImportGraph::new();
        graph.add_edge("a", "x");
        graph.add_edge("x", "b");
        graph.add_edge("a", "b");

        assert_eq!(labels(&graph, "a", "b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_first_neighbor_wins_over_shorter() {
        let mut graph = ImportGraph::new();
        graph.add_edge("a", "long1");
        graph.add_edge("a", "short");
        graph.add_edge("long1", "long2");
        graph.add_edge("long2", "goal");
        graph.add_edge("short", "goal");

        assert_eq!(
            labels(&graph, "a", "goal").unwrap(),
            vec!["a", "long1", "long2", "goal"]
        );
    }

    #[test]
    fn test_failed_branch_does_not_block_sibling() {
        let mut graph = ImportGraph::new();
        graph.add_edge("root", "x");
        graph.add_edge("root", "y");
        graph.add_edge("x", "shared");
        graph.add_edge("shared", "x");
        graph.add_edge("y", "shared");
        graph.add_edge("y", "z");
        graph.add_edge("z", "goal");

        assert_eq!(
            labels(&graph, "root", "goal").unwrap(),
            vec!["root", "y", "z", "goal"]
        );
    }

    #[test]
    fn test_pre_excluded_nodes_are_avoided() {
        let mut graph = ImportGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "d");
        graph.add_edge("a", "c");
        graph.add_edge("c", "d");

        let a = graph.get("a").unwrap();
        let b = graph.get("b").unwrap();
        let d = graph.get("d").unwrap();

        let excluded: ExclusionSet = [b].into_iter().collect();
        let path = graph.find_path_without(a, d, &excluded).unwrap();
        assert_eq!(path.labels(&graph), vec!["a", "c", "d"]);

        let excluded: ExclusionSet = [d].into_iter().collect();
        assert!(graph.find_path_without(a, d, &excluded).is_none());
    }

    #[test]
    fn test_cycle_terminates_when_unreachable() {
        let mut graph = ImportGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        graph.add_edge("b", "b");
        graph.node("c");

        assert_eq!(labels(&graph, "a", "c"), None);
    }
}
