//! Import graph
//!
//! Directed graph keyed by normalized file-path labels. Each distinct label
//! is interned to a single [`NodeId`]; edges are kept per node in insertion
//! order, duplicates included.

mod path;

pub use path::{ExclusionSet, ImportPath};

use std::collections::HashMap;

/// Identity of a node within the [`ImportGraph`] that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    label: String,
    edges: Vec<NodeId>,
}

/// Graph of resolved imports, owning all of its nodes
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edge_count: usize,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `label`, creating it on first use
    pub fn node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label: label.to_string(),
            edges: Vec::new(),
        });
        self.index.insert(label.to_string(), id);
        id
    }

    /// Look up a node without creating it
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Append a directed edge `from -> to`, creating either endpoint as needed
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.node(from);
        let to = self.node(to);
        self.nodes[from.0].edges.push(to);
        self.edge_count += 1;
    }

    /// Label of a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    /// Outgoing edges of a node, in insertion order
    pub fn edges(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].edges
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges(from).contains(&to)
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges, counting duplicates
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Find some path from `from` to `to`
    ///
    /// Neighbors are tried in edge insertion order and the first path found
    /// is returned. It is not necessarily the shortest one.
    pub fn find_path(&self, from: NodeId, to: NodeId) -> Option<ImportPath> {
        self.find_path_without(from, to, &ExclusionSet::new())
    }

    /// Find some path from `from` to `to` that avoids every node in `excluded`
    pub fn find_path_without(
        &self,
        from: NodeId,
        to: NodeId,
        excluded: &ExclusionSet,
    ) -> Option<ImportPath> {
        let mut excluded = excluded.clone();
        path::search(self, from, to, &mut excluded).map(ImportPath::from_reversed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_is_interned() {
        let mut graph = ImportGraph::new();
        let a = graph.node("src/a.ts");
        let again = graph.node("src/a.ts");
        assert_eq!(a, again);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.label(a), "src/a.ts");
    }

    #[test]
    fn test_get_does_not_create() {
        let mut graph = ImportGraph::new();
        assert_eq!(graph.get("missing"), None);
        assert!(graph.is_empty());

        let id = graph.node("present");
        assert_eq!(graph.get("present"), Some(id));
    }

    #[test]
    fn test_add_edge_keeps_duplicates() {
        let mut graph = ImportGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");

        let a = graph.get("a").unwrap();
        let b = graph.get("b").unwrap();
        assert_eq!(graph.edges(a), &[b, b]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.len(), 2);
        assert!(graph.has_edge(a, b));
        assert!(!graph.has_edge(b, a));
    }

    #[test]
    fn test_nodes_in_creation_order() {
        let mut graph = ImportGraph::new();
        graph.add_edge("root", "z");
        graph.add_edge("z", "a");

        let labels: Vec<&str> = graph.nodes().map(|id| graph.label(id)).collect();
        assert_eq!(labels, vec!["root", "z", "a"]);
    }
}
