// SPDX-License-Identifier: MIT OR Apache-2.0
//! Duplication input and its classification.

use ordoplay_graph::{Edge, Endpoint, Graph, GraphId, GraphSet, NodeId, RoutingData};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Detached description of an edge to copy.
///
/// References stay valid after the edge they describe is deleted, which lets a
/// cut remove the originals before the paste runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeReference {
    /// Source endpoint in the source graph
    pub source: Endpoint,
    /// Destination endpoint in the source graph
    pub destination: Endpoint,
    /// Routing metadata to carry over
    pub routing: RoutingData,
}

impl EdgeReference {
    /// Create a new reference
    pub fn new(source: Endpoint, destination: Endpoint, routing: RoutingData) -> Self {
        Self {
            source,
            destination,
            routing,
        }
    }

    /// Describe a live edge
    pub fn from_edge(edge: &Edge) -> Self {
        Self::new(edge.source.clone(), edge.destination.clone(), edge.routing)
    }
}

/// One member of a selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionItem {
    /// A node to duplicate
    Node(NodeId),
    /// An edge to duplicate
    Edge(EdgeReference),
    /// Marks the graph the selection was taken from
    Graph(GraphId),
    /// Any other editor object (comments, groups); ignored by duplication
    Other(String),
}

/// Heterogeneous duplication input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    items: Vec<SelectionItem>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection of nodes only
    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            items: nodes.into_iter().map(SelectionItem::Node).collect(),
        }
    }

    /// Select `nodes` together with every edge of `graph` attached to them.
    ///
    /// This is what a copy from the editor canvas hands to paste.
    pub fn with_attached_edges(graph: &Graph, nodes: &[NodeId]) -> Self {
        let mut selection = Self::from_nodes(nodes.iter().copied());
        selection.push(SelectionItem::Graph(graph.id));
        for edge in graph.edges() {
            if nodes.iter().any(|n| edge.involves_node(*n)) {
                selection.push(SelectionItem::Edge(EdgeReference::from_edge(edge)));
            }
        }
        selection
    }

    /// Append an item
    pub fn push(&mut self, item: SelectionItem) {
        self.items.push(item);
    }

    /// Builder form of [`Selection::push`]
    pub fn with(mut self, item: SelectionItem) -> Self {
        self.push(item);
        self
    }

    /// All items in selection order
    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    /// Check if the selection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A selection split into its duplication units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    /// Nodes to duplicate, first occurrence order, without repeats
    pub nodes: Vec<NodeId>,
    /// Edges to duplicate
    pub edges: Vec<EdgeReference>,
    /// Graph the selection was taken from
    pub source_scope: Option<GraphId>,
}

/// Partition a selection into nodes and edge references and find its source scope.
///
/// An explicit graph marker names the source scope; otherwise it is the graph
/// owning the first node that is found in `graphs`.
pub fn classify(selection: &Selection, graphs: &GraphSet) -> Classified {
    let mut classified = Classified::default();
    let mut seen = HashSet::new();
    let mut marker = None;
    let mut first_owner = None;

    for item in selection.items() {
        match item {
            SelectionItem::Node(id) => {
                if seen.insert(*id) {
                    classified.nodes.push(*id);
                    if first_owner.is_none() {
                        first_owner = graphs.owner_of(*id);
                    }
                }
            }
            SelectionItem::Edge(reference) => classified.edges.push(reference.clone()),
            SelectionItem::Graph(id) => {
                marker.get_or_insert(*id);
            }
            SelectionItem::Other(_) => {}
        }
    }

    classified.source_scope = marker.or(first_owner);
    tracing::trace!(
        nodes = classified.nodes.len(),
        edges = classified.edges.len(),
        scope = ?classified.source_scope,
        "Classified selection"
    );
    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordoplay_graph::{Graph, Node};

    #[test]
    fn test_partition_and_scope() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("App");
        let a = graph.insert_node(Node::named("A")).unwrap();
        let graph_id = graphs.add_graph(graph);

        let reference = EdgeReference::new(
            Endpoint::new(a, "OUT"),
            Endpoint::new(NodeId::new(), "IN"),
            RoutingData::default(),
        );
        let selection = Selection::new()
            .with(SelectionItem::Other("comment".into()))
            .with(SelectionItem::Node(a))
            .with(SelectionItem::Edge(reference.clone()))
            .with(SelectionItem::Node(a));

        let classified = classify(&selection, &graphs);
        assert_eq!(classified.nodes, vec![a]);
        assert_eq!(classified.edges, vec![reference]);
        assert_eq!(classified.source_scope, Some(graph_id));
    }

    #[test]
    fn test_marker_wins() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("App");
        let a = graph.insert_node(Node::named("A")).unwrap();
        graphs.add_graph(graph);
        let other = GraphId::new();

        let selection = Selection::from_nodes([a]).with(SelectionItem::Graph(other));
        assert_eq!(classify(&selection, &graphs).source_scope, Some(other));
    }

    #[test]
    fn test_unknown_nodes_have_no_scope() {
        let graphs = GraphSet::new();
        let selection = Selection::from_nodes([NodeId::new()]);
        let classified = classify(&selection, &graphs);
        assert_eq!(classified.nodes.len(), 1);
        assert_eq!(classified.source_scope, None);
    }
}
