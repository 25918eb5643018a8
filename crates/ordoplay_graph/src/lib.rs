// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scoped node graph model for `OrdoPlay` Editor.
//!
//! This crate provides the graph data model shared by the editor's
//! function-block networks:
//! - Nodes with named, typed event/data/adapter ports
//! - Directed edges addressed by (node, port name) pairs
//! - Graphs acting as naming scopes, held in a [`GraphSet`] arena
//!
//! Nodes and graphs are addressed by stable identifiers rather than
//! references, so node/port/edge cross links never form ownership cycles.

pub mod node;
pub mod port;
pub mod edge;
pub mod graph;

pub use node::{CopyError, Delta, DeviceMapping, Node, NodeId, NodeKind, NodeRegistry, NodeType, Position};
pub use port::{Port, PortDirection, PortKind, PortType, PortValue};
pub use edge::{Edge, EdgeId, Endpoint, RoutingData};
pub use graph::{ConnectionError, Graph, GraphError, GraphId, GraphSet, RemovedEdge, RemovedNode};
