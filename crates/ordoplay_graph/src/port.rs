// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.
//!
//! Ports have no identity of their own: an attachment point is addressed by
//! its owning node and its name, see [`crate::edge::Endpoint`].

use crate::edge::EdgeId;
use serde::{Deserialize, Serialize};

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Connection protocol family of a port.
///
/// The set is closed: every edge is created by exactly one of the three
/// edge-creation protocols, picked from the kind of its source port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// Event (execution) flow
    Event,
    /// Typed data flow
    Data,
    /// Adapter plug/socket pairing
    Adapter,
}

/// Type declared for a port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    /// Event flow
    Event,
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// 4D vector
    Vector4,
    /// Color (RGBA)
    Color,
    /// String value
    String,
    /// Any data type (for generic nodes)
    Any,
    /// Custom data type
    Custom(String),
    /// Adapter interface, named by its adapter type
    Adapter(String),
}

impl PortType {
    /// Protocol family this type belongs to
    pub fn kind(&self) -> PortKind {
        match self {
            Self::Event => PortKind::Event,
            Self::Adapter(_) => PortKind::Adapter,
            _ => PortKind::Data,
        }
    }

    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        if self.kind() != other.kind() {
            return false;
        }

        // Same types can always connect
        if self == other {
            return true;
        }

        match (self, other) {
            // Adapters only pair with the identical adapter type
            (Self::Adapter(_), _) | (_, Self::Adapter(_)) => false,
            (Self::Any, _) | (_, Self::Any) => true,
            // Numeric conversions
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => true,
            // Vector widening
            (Self::Float, Self::Vector2 | Self::Vector3 | Self::Vector4) => true,
            (Self::Vector2, Self::Vector3 | Self::Vector4) => true,
            (Self::Vector3, Self::Vector4) => true,
            (Self::Color, Self::Vector4) | (Self::Vector4, Self::Color) => true,
            _ => false,
        }
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within the owning node
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Declared type
    pub port_type: PortType,
    /// Default value declared by the node type
    pub default_value: Option<PortValue>,
    /// Literal value entered on this instance (inputs of value-bearing nodes)
    pub literal: Option<PortValue>,
    /// Whether multiple edges may attach to this port
    pub multi_connect: bool,
    /// Edges currently bound to this port
    pub edges: Vec<EdgeId>,
}

impl Port {
    /// Create a new port
    pub fn new(name: impl Into<String>, port_type: PortType, direction: PortDirection) -> Self {
        // Outputs fan out, events fan in and out
        let multi_connect = match port_type.kind() {
            PortKind::Event => true,
            PortKind::Adapter => false,
            PortKind::Data => direction == PortDirection::Output,
        };
        Self {
            name: name.into(),
            direction,
            port_type,
            default_value: None,
            literal: None,
            multi_connect,
            edges: Vec::new(),
        }
    }

    /// Create a new data input port
    pub fn input(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name, port_type, PortDirection::Input)
    }

    /// Create a new data output port
    pub fn output(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name, port_type, PortDirection::Output)
    }

    /// Create an event input
    pub fn event_input(name: impl Into<String>) -> Self {
        Self::new(name, PortType::Event, PortDirection::Input)
    }

    /// Create an event output
    pub fn event_output(name: impl Into<String>) -> Self {
        Self::new(name, PortType::Event, PortDirection::Output)
    }

    /// Create an adapter plug (the connecting side of an adapter pair)
    pub fn adapter_plug(name: impl Into<String>, adapter_type: impl Into<String>) -> Self {
        Self::new(name, PortType::Adapter(adapter_type.into()), PortDirection::Output)
    }

    /// Create an adapter socket (the receiving side of an adapter pair)
    pub fn adapter_socket(name: impl Into<String>, adapter_type: impl Into<String>) -> Self {
        Self::new(name, PortType::Adapter(adapter_type.into()), PortDirection::Input)
    }

    /// Set the default value
    pub fn with_default(mut self, value: PortValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the literal value
    pub fn with_literal(mut self, value: PortValue) -> Self {
        self.literal = Some(value);
        self
    }

    /// Allow or forbid multiple connections
    pub fn with_multi_connect(mut self, multi_connect: bool) -> Self {
        self.multi_connect = multi_connect;
        self
    }

    /// Protocol family of this port
    pub fn kind(&self) -> PortKind {
        self.port_type.kind()
    }

    /// Whether any edge is bound to this port
    pub fn is_connected(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Check if an edge from this port to `other` is type and direction compatible
    pub fn can_connect(&self, other: &Port) -> bool {
        self.direction == PortDirection::Output
            && other.direction == PortDirection::Input
            && self.port_type.can_connect_to(&other.port_type)
    }

    /// Bind `edge` at `slot`, clamped to the number of bound edges
    pub(crate) fn bind_at(&mut self, slot: usize, edge: EdgeId) {
        if !self.edges.contains(&edge) {
            let slot = slot.min(self.edges.len());
            self.edges.insert(slot, edge);
        }
    }

    pub(crate) fn unbind(&mut self, edge: EdgeId) {
        self.edges.retain(|e| *e != edge);
    }
}

/// Value that can be stored in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// 4D vector
    Vector4([f32; 4]),
    /// Color
    Color([f32; 4]),
    /// String
    String(String),
}

impl PortValue {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Bool(_) => PortType::Bool,
            Self::Int(_) => PortType::Int,
            Self::Float(_) => PortType::Float,
            Self::Vector2(_) => PortType::Vector2,
            Self::Vector3(_) => PortType::Vector3,
            Self::Vector4(_) => PortType::Vector4,
            Self::Color(_) => PortType::Color,
            Self::String(_) => PortType::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_type() {
        assert_eq!(PortType::Event.kind(), PortKind::Event);
        assert_eq!(PortType::Float.kind(), PortKind::Data);
        assert_eq!(PortType::Custom("Tag".into()).kind(), PortKind::Data);
        assert_eq!(PortType::Adapter("ATimer".into()).kind(), PortKind::Adapter);
    }

    #[test]
    fn test_type_compatibility() {
        assert!(PortType::Int.can_connect_to(&PortType::Float));
        assert!(PortType::Any.can_connect_to(&PortType::String));
        assert!(!PortType::Any.can_connect_to(&PortType::Event));
        assert!(!PortType::Event.can_connect_to(&PortType::Bool));
        assert!(PortType::Adapter("A".into()).can_connect_to(&PortType::Adapter("A".into())));
        assert!(!PortType::Adapter("A".into()).can_connect_to(&PortType::Adapter("B".into())));
        assert!(!PortType::Any.can_connect_to(&PortType::Adapter("A".into())));
    }

    #[test]
    fn test_default_multi_connect() {
        assert!(!Port::input("In", PortType::Float).multi_connect);
        assert!(Port::output("Out", PortType::Float).multi_connect);
        assert!(Port::event_input("REQ").multi_connect);
        assert!(!Port::adapter_plug("P", "A").multi_connect);
    }

    #[test]
    fn test_direction_check() {
        let out = Port::output("Out", PortType::Int);
        let inp = Port::input("In", PortType::Float);
        assert!(out.can_connect(&inp));
        assert!(!inp.can_connect(&out));
    }
}
