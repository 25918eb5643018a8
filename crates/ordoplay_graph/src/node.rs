// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::edge::EdgeId;
use crate::port::{Port, PortDirection, PortType, PortValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer position of a node in the graph canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset that moves `origin` onto `self`, if it fits in `i32`
    pub fn delta_from(self, origin: Position) -> Option<Delta> {
        Some(Delta::new(
            self.x.checked_sub(origin.x)?,
            self.y.checked_sub(origin.y)?,
        ))
    }

    /// This position shifted by `delta`, if it fits in `i32`
    pub fn checked_add(self, delta: Delta) -> Option<Position> {
        Some(Position::new(
            self.x.checked_add(delta.dx)?,
            self.y.checked_add(delta.dy)?,
        ))
    }
}

/// Positional offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    /// Horizontal offset
    pub dx: i32,
    /// Vertical offset
    pub dy: i32,
}

impl Delta {
    /// Create a new delta
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Binding of a node to the device resource it is deployed on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceMapping {
    /// Device name
    pub device: String,
    /// Resource on the device
    pub resource: String,
}

impl DeviceMapping {
    /// Create a new mapping
    pub fn new(device: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            resource: resource.into(),
        }
    }
}

/// Node kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Ordinary node
    #[default]
    Plain,
    /// Node whose input ports carry literal values entered by the user
    ValueBearing,
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type identifier
    pub id: String,
    /// Default instance name
    pub name: String,
    /// Kind of the instances
    pub kind: NodeKind,
    /// Description
    pub description: String,
    /// Default input ports
    pub inputs: Vec<Port>,
    /// Default output ports
    pub outputs: Vec<Port>,
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Instance name, unique within the owning graph
    pub name: String,
    /// Node type ID
    pub node_type: String,
    /// Node kind
    pub kind: NodeKind,
    /// Position in the graph canvas
    pub position: Position,
    /// Device/resource the node is mapped to
    pub mapping: Option<DeviceMapping>,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType) -> Self {
        Self {
            id: NodeId::new(),
            name: node_type.name.clone(),
            node_type: node_type.id.clone(),
            kind: node_type.kind,
            position: Position::default(),
            mapping: None,
            inputs: node_type.inputs.clone(),
            outputs: node_type.outputs.clone(),
        }
    }

    /// Create an untyped node with no ports
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            node_type: String::new(),
            kind: NodeKind::Plain,
            position: Position::default(),
            mapping: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the kind
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a port, sorted into inputs or outputs by its direction
    pub fn with_port(mut self, port: Port) -> Self {
        match port.direction {
            PortDirection::Input => self.inputs.push(port),
            PortDirection::Output => self.outputs.push(port),
        }
        self
    }

    /// Set the device mapping
    pub fn with_mapping(mut self, mapping: DeviceMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Whether the node's input ports carry literal values
    pub fn is_value_bearing(&self) -> bool {
        self.kind == NodeKind::ValueBearing
    }

    /// Get a port by name
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports().find(|p| p.name == name)
    }

    /// Get a mutable port by name
    pub fn port_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find(|p| p.name == name)
    }

    /// Get all ports, inputs first, each in declaration order
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Get all ports mutably
    pub fn ports_mut(&mut self) -> impl Iterator<Item = &mut Port> {
        self.inputs.iter_mut().chain(self.outputs.iter_mut())
    }

    /// Edges bound to any port of this node
    pub fn bound_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.ports().flat_map(|p| p.edges.iter().copied())
    }

    /// Whether no port of this node has a bound edge
    pub fn is_unbound(&self) -> bool {
        self.ports().all(|p| p.edges.is_empty())
    }

    /// Produce an independent copy of this node's structure under a fresh ID.
    ///
    /// The copy carries the name, type, kind, position, device mapping and the
    /// full port interface including edge bindings. Literal input values are
    /// instance state, not structure, and are absent from the copy.
    pub fn structural_copy(&self) -> Result<Node, CopyError> {
        if self.name.is_empty() {
            return Err(CopyError::EmptyName);
        }

        let mut seen = HashSet::new();
        for port in self.ports() {
            if !seen.insert(port.name.as_str()) {
                return Err(CopyError::DuplicatePort(port.name.clone()));
            }
        }

        let bytes = bincode::serialize(&NodeSnapshot::from(self))?;
        let snapshot: NodeSnapshot = bincode::deserialize(&bytes)?;
        Ok(snapshot.into_node(NodeId::new()))
    }
}

/// Structural record of a node, as encoded by [`Node::structural_copy`]
#[derive(Serialize, Deserialize)]
struct NodeSnapshot {
    name: String,
    node_type: String,
    kind: NodeKind,
    position: Position,
    mapping: Option<DeviceMapping>,
    inputs: Vec<PortSnapshot>,
    outputs: Vec<PortSnapshot>,
}

#[derive(Serialize, Deserialize)]
struct PortSnapshot {
    name: String,
    direction: PortDirection,
    port_type: PortType,
    default_value: Option<PortValue>,
    multi_connect: bool,
    edges: Vec<EdgeId>,
}

impl From<&Node> for NodeSnapshot {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            kind: node.kind,
            position: node.position,
            mapping: node.mapping.clone(),
            inputs: node.inputs.iter().map(PortSnapshot::from).collect(),
            outputs: node.outputs.iter().map(PortSnapshot::from).collect(),
        }
    }
}

impl From<&Port> for PortSnapshot {
    fn from(port: &Port) -> Self {
        Self {
            name: port.name.clone(),
            direction: port.direction,
            port_type: port.port_type.clone(),
            default_value: port.default_value.clone(),
            multi_connect: port.multi_connect,
            edges: port.edges.clone(),
        }
    }
}

impl PortSnapshot {
    fn into_port(self) -> Port {
        Port {
            name: self.name,
            direction: self.direction,
            port_type: self.port_type,
            default_value: self.default_value,
            literal: None,
            multi_connect: self.multi_connect,
            edges: self.edges,
        }
    }
}

impl NodeSnapshot {
    fn into_node(self, id: NodeId) -> Node {
        Node {
            id,
            name: self.name,
            node_type: self.node_type,
            kind: self.kind,
            position: self.position,
            mapping: self.mapping,
            inputs: self.inputs.into_iter().map(PortSnapshot::into_port).collect(),
            outputs: self.outputs.into_iter().map(PortSnapshot::into_port).collect(),
        }
    }
}

/// Registry of available node types
pub struct NodeRegistry {
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Error when a node's structure cannot be copied
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Node has no name
    #[error("Node has an empty name")]
    EmptyName,

    /// Two ports share a name
    #[error("Duplicate port name: {0}")]
    DuplicatePort(String),

    /// Snapshot encoding failed
    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_type() -> NodeType {
        NodeType {
            id: "E_DELAY".to_string(),
            name: "E_DELAY".to_string(),
            kind: NodeKind::ValueBearing,
            description: "Delayed event propagation".to_string(),
            inputs: vec![
                Port::event_input("START"),
                Port::input("DT", PortType::Int).with_default(PortValue::Int(0)),
            ],
            outputs: vec![Port::event_output("EO")],
        }
    }

    #[test]
    fn test_node_from_type() {
        let node = Node::new(&timer_type()).with_position(40, 60);
        assert_eq!(node.name, "E_DELAY");
        assert_eq!(node.position, Position::new(40, 60));
        assert!(node.is_value_bearing());
        assert_eq!(node.ports().count(), 3);
        assert!(node.port("DT").is_some());
        assert!(node.port("missing").is_none());
    }

    #[test]
    fn test_structural_copy_is_independent() {
        let mut node = Node::new(&timer_type()).with_mapping(DeviceMapping::new("PLC", "RES0"));
        let edge = EdgeId::new();
        node.port_mut("START").unwrap().edges.push(edge);
        node.port_mut("DT").unwrap().literal = Some(PortValue::Int(250));

        let copy = node.structural_copy().unwrap();
        assert_ne!(copy.id, node.id);
        assert_eq!(copy.name, node.name);
        assert_eq!(copy.mapping, node.mapping);
        assert_eq!(copy.port("START").unwrap().edges, vec![edge]);
        assert_eq!(copy.port("DT").unwrap().default_value, Some(PortValue::Int(0)));
        // Literals are instance state
        assert_eq!(copy.port("DT").unwrap().literal, None);
    }

    #[test]
    fn test_structural_copy_rejects_malformed() {
        let node = Node::named("bad")
            .with_port(Port::event_input("X"))
            .with_port(Port::event_output("X"));
        assert!(matches!(node.structural_copy(), Err(CopyError::DuplicatePort(name)) if name == "X"));

        let unnamed = Node::named("");
        assert!(matches!(unnamed.structural_copy(), Err(CopyError::EmptyName)));
    }

    #[test]
    fn test_position_arithmetic() {
        let p = Position::new(10, -5).checked_add(Delta::new(20, 20));
        assert_eq!(p, Some(Position::new(30, 15)));
        assert_eq!(Position::new(5, 5).delta_from(Position::new(2, 9)), Some(Delta::new(3, -4)));
    }

    #[test]
    fn test_position_overflow_is_none() {
        assert_eq!(Position::new(i32::MAX - 5, 0).checked_add(Delta::new(20, 20)), None);
        assert_eq!(Position::new(0, i32::MIN).checked_add(Delta::new(0, -1)), None);
        assert_eq!(Position::new(i32::MAX, 0).delta_from(Position::new(-1, 0)), None);
    }

    #[test]
    fn test_registry() {
        let mut registry = NodeRegistry::new();
        registry.register(timer_type());
        assert!(registry.create_node("E_DELAY").is_some());
        assert!(registry.create_node("E_CYCLE").is_none());
        assert_eq!(registry.types().count(), 1);
    }
}
