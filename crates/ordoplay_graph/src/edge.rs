// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// One end of an edge: a port addressed by node and port name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Owning node
    pub node: NodeId,
    /// Port name on that node
    pub port: String,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(node: NodeId, port: impl Into<String>) -> Self {
        Self {
            node,
            port: port.into(),
        }
    }
}

/// Layout hints for drawing an edge between its two ports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingData {
    /// Horizontal offset of the first bend from the source
    pub dx1: i32,
    /// Horizontal offset of the last bend from the destination
    pub dx2: i32,
    /// Vertical offset of the middle segment
    pub dy: i32,
}

/// A directed edge from a source port to a destination port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source endpoint (an output port)
    pub source: Endpoint,
    /// Destination endpoint (an input port)
    pub destination: Endpoint,
    /// Routing metadata
    pub routing: RoutingData,
}

impl Edge {
    /// Create a new edge with a fresh ID
    pub fn new(source: Endpoint, destination: Endpoint, routing: RoutingData) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            destination,
            routing,
        }
    }

    /// Check if this edge involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source.node == node_id || self.destination.node == node_id
    }

    /// Check if this edge links exactly these two endpoints
    pub fn links(&self, source: &Endpoint, destination: &Endpoint) -> bool {
        self.source == *source && self.destination == *destination
    }
}
