// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural cloning of a single node.

use crate::naming::NameAllocator;
use crate::report::Message;
use ordoplay_graph::{CopyError, Delta, Graph, GraphError, GraphId, Node, NodeId};

/// Produce a detached clone of `original` ready for insertion into `scope`.
///
/// The clone gets a fresh identity, no edge bindings, no device mapping, its
/// position shifted by `delta` and a name unique in `scope`. Literal input
/// values are not part of the structural copy and are carried over here.
pub fn clone_node(
    original: &Node,
    scope: &Graph,
    delta: Delta,
    names: &dyn NameAllocator,
) -> Result<Node, CloneError> {
    let mut clone = original.structural_copy().map_err(|source| CloneError::Copy {
        node: original.name.clone(),
        source,
    })?;

    for port in clone.ports_mut() {
        port.edges.clear();
    }
    clone.mapping = None;
    clone.position = original
        .position
        .checked_add(delta)
        .ok_or_else(|| CloneError::PositionOutOfRange {
            node: original.name.clone(),
            delta,
        })?;

    copy_literals(original, &mut clone)?;

    clone.name = names.unique_name(scope, &clone, &original.name);
    Ok(clone)
}

/// Copy literal input values, in declaration order, onto the clone's ports
fn copy_literals(original: &Node, clone: &mut Node) -> Result<(), CloneError> {
    for source in &original.inputs {
        let Some(value) = &source.literal else {
            continue;
        };
        let Some(target) = clone.inputs.iter_mut().find(|p| p.name == source.name) else {
            return Err(CloneError::MissingValuePort {
                node: original.name.clone(),
                port: source.name.clone(),
            });
        };
        target.literal = Some(value.clone());
    }
    Ok(())
}

/// Error when a node cannot be duplicated
#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    /// The selected node no longer exists
    #[error("Node {0:?} not found")]
    NodeNotFound(NodeId),

    /// The destination graph does not exist
    #[error("Destination graph {0:?} not found")]
    ScopeNotFound(GraphId),

    /// Structural copy failed
    #[error("Cannot copy node '{node}': {source}")]
    Copy {
        /// Original node name
        node: String,
        /// Underlying failure
        source: CopyError,
    },

    /// A literal value has no port to go to on the clone
    #[error("Cannot copy value of '{node}.{port}': port missing on the copy")]
    MissingValuePort {
        /// Original node name
        node: String,
        /// Port name
        port: String,
    },

    /// The shifted position does not fit the canvas coordinates
    #[error("Cannot move copy of '{node}' by {delta:?}: position out of range")]
    PositionOutOfRange {
        /// Original node name
        node: String,
        /// Requested offset
        delta: Delta,
    },

    /// The clone was rejected by the destination graph
    #[error("Cannot insert copy of '{node}': {source}")]
    Insert {
        /// Original node name
        node: String,
        /// Underlying failure
        source: GraphError,
    },
}

impl CloneError {
    /// User-facing message for this failure, attributed to `original`
    pub fn to_message(&self, original: NodeId) -> Message {
        Message::error(self.to_string()).for_node(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SuffixNameAllocator;
    use ordoplay_graph::{DeviceMapping, EdgeId, NodeKind, Port, PortType, PortValue, Position};

    fn constant(kind: NodeKind) -> Node {
        Node::named("Const")
            .with_kind(kind)
            .with_position(10, 20)
            .with_port(Port::input("IN", PortType::Int).with_literal(PortValue::Int(7)))
            .with_port(Port::input("NAME", PortType::String).with_literal(PortValue::String("x".into())))
            .with_port(Port::input("EN", PortType::Bool))
            .with_port(Port::output("OUT", PortType::Int))
            .with_mapping(DeviceMapping::new("PLC", "RES0"))
    }

    #[test]
    fn test_clone_resets_bindings_and_mapping() {
        let mut original = constant(NodeKind::Plain);
        original.port_mut("OUT").unwrap().edges.push(EdgeId::new());
        let scope = Graph::new("Net");

        let clone = clone_node(&original, &scope, Delta::new(5, 5), &SuffixNameAllocator::default()).unwrap();
        assert_ne!(clone.id, original.id);
        assert!(clone.is_unbound());
        assert_eq!(clone.mapping, None);
        assert_eq!(clone.position, Position::new(15, 25));
        assert_eq!(clone.name, "Const");
        // Original untouched
        assert_eq!(original.port("OUT").unwrap().edges.len(), 1);
        assert!(original.mapping.is_some());
    }

    #[test]
    fn test_value_bearing_literals_survive() {
        let original = constant(NodeKind::ValueBearing);
        let scope = Graph::new("Net");

        let clone = clone_node(&original, &scope, Delta::default(), &SuffixNameAllocator::default()).unwrap();
        assert_eq!(clone.port("IN").unwrap().literal, Some(PortValue::Int(7)));
        assert_eq!(clone.port("NAME").unwrap().literal, Some(PortValue::String("x".into())));
        assert_eq!(clone.port("EN").unwrap().literal, None);
    }

    #[test]
    fn test_plain_node_literals_survive() {
        let original = constant(NodeKind::Plain);
        let scope = Graph::new("Net");

        let clone = clone_node(&original, &scope, Delta::default(), &SuffixNameAllocator::default()).unwrap();
        assert_eq!(clone.port("IN").unwrap().literal, Some(PortValue::Int(7)));
        assert_eq!(clone.port("NAME").unwrap().literal, Some(PortValue::String("x".into())));
        assert_eq!(clone.port("EN").unwrap().literal, None);
    }

    #[test]
    fn test_position_overflow_fails() {
        let original = constant(NodeKind::Plain).with_position(i32::MAX - 5, 0);
        let scope = Graph::new("Net");

        let err = clone_node(&original, &scope, Delta::new(20, 20), &SuffixNameAllocator::default()).unwrap_err();
        assert!(matches!(err, CloneError::PositionOutOfRange { ref node, .. } if node == "Const"));
    }

    #[test]
    fn test_name_unique_in_scope() {
        let original = constant(NodeKind::Plain);
        let mut scope = Graph::new("Net");
        scope.insert_node(Node::named("Const")).unwrap();

        let clone = clone_node(&original, &scope, Delta::default(), &SuffixNameAllocator::default()).unwrap();
        assert_eq!(clone.name, "Const_1");
    }

    #[test]
    fn test_malformed_node_fails() {
        let original = Node::named("Broken")
            .with_port(Port::input("X", PortType::Int))
            .with_port(Port::output("X", PortType::Int));
        let scope = Graph::new("Net");

        let err = clone_node(&original, &scope, Delta::default(), &SuffixNameAllocator::default()).unwrap_err();
        assert!(matches!(err, CloneError::Copy { .. }));
        let message = err.to_message(original.id);
        assert_eq!(message.node, Some(original.id));
        assert!(message.text.contains("Broken"));
    }
}
