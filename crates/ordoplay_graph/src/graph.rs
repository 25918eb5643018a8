// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and edges.
//!
//! A [`Graph`] is a naming scope: no two of its nodes share a name, and every
//! edge it holds links two distinct nodes of the same graph. [`GraphSet`] is
//! the arena that owns all graphs of a document.

use crate::edge::{Edge, EdgeId, Endpoint, RoutingData};
use crate::node::{Node, NodeId};
use crate::port::Port;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(pub Uuid);

impl GraphId {
    /// Create a new random graph ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node removed from a graph together with the edges that were attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    /// The node, with all port bindings cleared
    pub node: Node,
    /// Position the node held in the graph's node order
    pub index: usize,
    /// Edges detached by the removal, in removal order
    pub edges: Vec<RemovedEdge>,
}

/// An edge detached from a graph and the position it held in the edge order
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedEdge {
    /// The edge
    pub edge: Edge,
    /// Index in the edge order at the time of removal
    pub index: usize,
}

/// A node graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Graph ID
    pub id: GraphId,
    /// Graph name
    pub name: String,
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GraphId::new(),
            name: name.into(),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    /// Add a node to the graph.
    ///
    /// The node must carry a name not yet used in this graph and must not be
    /// bound to any edge.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        self.check_insert(&node)?;
        let id = node.id;
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Add a node at `index` in the node order, clamped to the current length.
    ///
    /// Same rules as [`Graph::insert_node`].
    pub fn insert_node_at(&mut self, index: usize, node: Node) -> Result<NodeId, GraphError> {
        self.check_insert(&node)?;
        let id = node.id;
        let index = index.min(self.nodes.len());
        self.nodes.shift_insert(index, id, node);
        Ok(id)
    }

    /// Check that `node` could be inserted right now
    pub fn check_insert(&self, node: &Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if self.contains_name(&node.name) {
            return Err(GraphError::DuplicateName(node.name.clone()));
        }
        if !node.is_unbound() {
            return Err(GraphError::BoundNode(node.id));
        }
        Ok(())
    }

    /// Remove a node and its edges
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<RemovedNode> {
        let index = self.nodes.get_index_of(&node_id)?;

        let attached: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.involves_node(node_id))
            .map(|e| e.id)
            .collect();
        let edges = attached
            .into_iter()
            .filter_map(|id| {
                let index = self.edges.get_index_of(&id)?;
                let edge = self.remove_edge(id)?;
                Some(RemovedEdge { edge, index })
            })
            .collect();

        let node = self.nodes.shift_remove(&node_id)?;
        Some(RemovedNode { node, index, edges })
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Rename a node, keeping names unique in this graph
    pub fn rename_node(&mut self, node_id: NodeId, name: impl Into<String>) -> Result<(), GraphError> {
        let name = name.into();
        if self.nodes.values().any(|n| n.name == name && n.id != node_id) {
            return Err(GraphError::DuplicateName(name));
        }
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        node.name = name;
        Ok(())
    }

    /// Get a node by name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Check whether a node with this name exists
    pub fn contains_name(&self, name: &str) -> bool {
        self.nodes.values().any(|n| n.name == name)
    }

    /// Check whether a node belongs to this graph
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolve an endpoint to its port
    pub fn port(&self, endpoint: &Endpoint) -> Option<&Port> {
        self.node(endpoint.node)?.port(&endpoint.port)
    }

    /// Validate a prospective edge without creating it.
    ///
    /// Checks existence of both ends, that they are on distinct nodes, port
    /// direction and type compatibility, connection capacity and that no
    /// identical edge already exists.
    pub fn check_connection(
        &self,
        source: &Endpoint,
        destination: &Endpoint,
    ) -> Result<(&Port, &Port), ConnectionError> {
        let source_node = self
            .node(source.node)
            .ok_or(ConnectionError::NodeNotFound(source.node))?;
        let target_node = self
            .node(destination.node)
            .ok_or(ConnectionError::NodeNotFound(destination.node))?;

        let source_port = source_node
            .port(&source.port)
            .ok_or_else(|| ConnectionError::PortNotFound(source.port.clone()))?;
        let target_port = target_node
            .port(&destination.port)
            .ok_or_else(|| ConnectionError::PortNotFound(destination.port.clone()))?;

        if source.node == destination.node {
            return Err(ConnectionError::SelfLoop);
        }

        if !source_port.can_connect(target_port) {
            return Err(ConnectionError::IncompatiblePorts);
        }

        if self.find_edge(source, destination).is_some() {
            return Err(ConnectionError::AlreadyExists);
        }

        if !target_port.multi_connect && target_port.is_connected() {
            return Err(ConnectionError::PortAlreadyConnected(destination.port.clone()));
        }
        if !source_port.multi_connect && source_port.is_connected() {
            return Err(ConnectionError::PortAlreadyConnected(source.port.clone()));
        }

        Ok((source_port, target_port))
    }

    /// Validate and add a new edge between two ports
    pub fn connect(
        &mut self,
        source: Endpoint,
        destination: Endpoint,
        routing: RoutingData,
    ) -> Result<EdgeId, ConnectionError> {
        self.check_connection(&source, &destination)?;
        let edge = Edge::new(source, destination, routing);
        Ok(self.insert_edge(edge)?)
    }

    /// Insert an edge with its existing identity and bind both ports.
    ///
    /// Only structural consistency is checked; use [`Graph::check_connection`]
    /// for compatibility rules.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        let index = self.edges.len();
        self.insert_edge_at(index, edge)
    }

    /// Insert an edge at `index` in the edge order, clamped to the current length.
    ///
    /// Same rules as [`Graph::insert_edge`].
    pub fn insert_edge_at(&mut self, index: usize, edge: Edge) -> Result<EdgeId, GraphError> {
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        if edge.source.node == edge.destination.node {
            return Err(GraphError::SelfLoop(edge.id));
        }
        for endpoint in [&edge.source, &edge.destination] {
            if self.port(endpoint).is_none() {
                return Err(GraphError::DanglingEdge(edge.id));
            }
        }

        let id = edge.id;
        let index = index.min(self.edges.len());
        // Port bindings follow the graph's edge order
        let edges = &self.edges;
        for endpoint in [&edge.source, &edge.destination] {
            if let Some(port) = self
                .nodes
                .get_mut(&endpoint.node)
                .and_then(|n| n.port_mut(&endpoint.port))
            {
                let slot = port
                    .edges
                    .iter()
                    .filter(|e| edges.get_index_of(*e).is_some_and(|i| i < index))
                    .count();
                port.bind_at(slot, id);
            }
        }
        self.edges.shift_insert(index, id, edge);
        Ok(id)
    }

    /// Remove an edge and unbind its ports
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(&edge_id)?;
        for endpoint in [&edge.source, &edge.destination] {
            if let Some(port) = self
                .nodes
                .get_mut(&endpoint.node)
                .and_then(|n| n.port_mut(&endpoint.port))
            {
                port.unbind(edge_id);
            }
        }
        Some(edge)
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    /// Find the edge linking two endpoints
    pub fn find_edge(&self, source: &Endpoint, destination: &Endpoint) -> Option<&Edge> {
        self.edges.values().find(|e| e.links(source, destination))
    }

    /// Get all edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Get edges involving a node
    pub fn edges_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |e| e.involves_node(node_id))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// The set of graphs of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSet {
    graphs: IndexMap<GraphId, Graph>,
}

impl GraphSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a graph
    pub fn add_graph(&mut self, graph: Graph) -> GraphId {
        let id = graph.id;
        self.graphs.insert(id, graph);
        id
    }

    /// Remove a graph
    pub fn remove_graph(&mut self, graph_id: GraphId) -> Option<Graph> {
        self.graphs.shift_remove(&graph_id)
    }

    /// Get a graph by ID
    pub fn graph(&self, graph_id: GraphId) -> Option<&Graph> {
        self.graphs.get(&graph_id)
    }

    /// Get a mutable graph by ID
    pub fn graph_mut(&mut self, graph_id: GraphId) -> Option<&mut Graph> {
        self.graphs.get_mut(&graph_id)
    }

    /// Check whether a graph exists
    pub fn contains(&self, graph_id: GraphId) -> bool {
        self.graphs.contains_key(&graph_id)
    }

    /// Get all graphs
    pub fn graphs(&self) -> impl Iterator<Item = &Graph> {
        self.graphs.values()
    }

    /// Find the graph that owns a node
    pub fn owner_of(&self, node_id: NodeId) -> Option<GraphId> {
        self.graphs
            .values()
            .find(|g| g.contains_node(node_id))
            .map(|g| g.id)
    }

    /// Find a node in any graph
    pub fn find_node(&self, node_id: NodeId) -> Option<&Node> {
        self.graphs.values().find_map(|g| g.node(node_id))
    }
}

/// Error when mutating a graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node ID already present
    #[error("Node already in graph: {0:?}")]
    DuplicateNode(NodeId),

    /// Name already used in this scope
    #[error("Node name already in use: {0}")]
    DuplicateName(String),

    /// Node is not in this graph
    #[error("Node not in graph: {0:?}")]
    UnknownNode(NodeId),

    /// Node still references edges
    #[error("Node has bound edges: {0:?}")]
    BoundNode(NodeId),

    /// Edge ID already present
    #[error("Edge already in graph: {0:?}")]
    DuplicateEdge(EdgeId),

    /// Edge endpoint does not exist in this graph
    #[error("Edge endpoint not in graph: {0:?}")]
    DanglingEdge(EdgeId),

    /// Edge links a node to itself
    #[error("Edge links a node to itself: {0:?}")]
    SelfLoop(EdgeId),
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Incompatible port types or directions
    #[error("Incompatible ports")]
    IncompatiblePorts,

    /// Port cannot accept another connection
    #[error("Port already connected: {0}")]
    PortAlreadyConnected(String),

    /// Identical edge exists
    #[error("Edge already exists")]
    AlreadyExists,

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// Structural insertion failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}
