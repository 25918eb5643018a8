// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge-creation protocols.
//!
//! Each port kind has its own protocol: the rules an edge of that kind must
//! satisfy beyond the graph's generic connection checks. The protocol is fixed
//! when the command is created, see [`CreateEdgeCommand::for_kind`].

use crate::command::{CommandError, CommandState};
use ordoplay_graph::{ConnectionError, Edge, EdgeId, Endpoint, Graph, PortKind, RoutingData};

/// Command that creates one edge inside a graph
#[derive(Debug, Clone)]
pub struct CreateEdgeCommand {
    protocol: PortKind,
    source: Option<Endpoint>,
    destination: Option<Endpoint>,
    routing: RoutingData,
    edge: Option<Edge>,
    state: CommandState,
}

impl CreateEdgeCommand {
    /// Create a command following the protocol for `kind`
    pub fn for_kind(kind: PortKind) -> Self {
        Self {
            protocol: kind,
            source: None,
            destination: None,
            routing: RoutingData::default(),
            edge: None,
            state: CommandState::Idle,
        }
    }

    /// Event-edge protocol
    pub fn event() -> Self {
        Self::for_kind(PortKind::Event)
    }

    /// Data-edge protocol
    pub fn data() -> Self {
        Self::for_kind(PortKind::Data)
    }

    /// Adapter-edge protocol
    pub fn adapter() -> Self {
        Self::for_kind(PortKind::Adapter)
    }

    /// Protocol this command follows
    pub fn protocol(&self) -> PortKind {
        self.protocol
    }

    /// Set the source endpoint
    pub fn set_source(&mut self, source: Endpoint) {
        self.source = Some(source);
    }

    /// Set the destination endpoint
    pub fn set_destination(&mut self, destination: Endpoint) {
        self.destination = Some(destination);
    }

    /// Set the routing metadata
    pub fn set_routing(&mut self, routing: RoutingData) {
        self.routing = routing;
    }

    /// Source endpoint
    pub fn source(&self) -> Option<&Endpoint> {
        self.source.as_ref()
    }

    /// Destination endpoint
    pub fn destination(&self) -> Option<&Endpoint> {
        self.destination.as_ref()
    }

    /// Routing metadata
    pub fn routing(&self) -> RoutingData {
        self.routing
    }

    /// ID of the created edge, once executed
    pub fn edge_id(&self) -> Option<EdgeId> {
        self.edge.as_ref().map(|e| e.id)
    }

    /// Lifecycle state
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Whether executing now, after everything in `pending`, would create a valid edge
    pub fn can_execute(&self, graph: &Graph, pending: &[CreateEdgeCommand]) -> bool {
        self.check(graph, pending).is_ok()
    }

    /// Validate the edge against `graph` and the not yet executed `pending` edges
    pub fn check(&self, graph: &Graph, pending: &[CreateEdgeCommand]) -> Result<(), ConnectionError> {
        let (Some(source), Some(destination)) = (&self.source, &self.destination) else {
            return Err(ConnectionError::IncompatiblePorts);
        };

        let (source_port, target_port) = graph.check_connection(source, destination)?;
        if source_port.kind() != self.protocol || target_port.kind() != self.protocol {
            return Err(ConnectionError::IncompatiblePorts);
        }

        for other in pending {
            let (Some(other_source), Some(other_destination)) = (other.source(), other.destination()) else {
                continue;
            };
            if other_source == source && other_destination == destination {
                return Err(ConnectionError::AlreadyExists);
            }
            match self.protocol {
                // Events fan in and out freely
                PortKind::Event => {}
                PortKind::Data => {
                    if !target_port.multi_connect && other_destination == destination {
                        return Err(ConnectionError::PortAlreadyConnected(destination.port.clone()));
                    }
                }
                // An adapter plug pairs with exactly one socket
                PortKind::Adapter => {
                    if other_source == source {
                        return Err(ConnectionError::PortAlreadyConnected(source.port.clone()));
                    }
                    if other_destination == destination {
                        return Err(ConnectionError::PortAlreadyConnected(destination.port.clone()));
                    }
                }
            }
        }

        Ok(())
    }

    /// Create the edge
    pub fn execute(&mut self, graph: &mut Graph) -> Result<EdgeId, CommandError> {
        self.state.require(CommandState::Idle, "execute")?;
        self.check(graph, &[])?;

        let (Some(source), Some(destination)) = (self.source.clone(), self.destination.clone()) else {
            return Err(CommandError::NotExecutable("edge endpoints not set".to_string()));
        };
        let edge = Edge::new(source, destination, self.routing);
        let id = graph.insert_edge(edge.clone())?;
        self.edge = Some(edge);
        self.state = CommandState::Executed;
        Ok(id)
    }

    /// Remove the created edge
    pub fn undo(&mut self, graph: &mut Graph) -> Result<(), CommandError> {
        self.state.require(CommandState::Executed, "undo")?;
        if let Some(id) = self.edge_id() {
            if graph.remove_edge(id).is_none() {
                // Already gone together with one of its nodes
                tracing::trace!(edge = ?id, "Edge already removed");
            }
        }
        self.state = CommandState::Undone;
        Ok(())
    }

    /// Re-create the edge with its original identity
    pub fn redo(&mut self, graph: &mut Graph) -> Result<(), CommandError> {
        self.state.require(CommandState::Undone, "redo")?;
        if let Some(edge) = &self.edge {
            graph.insert_edge(edge.clone())?;
        }
        self.state = CommandState::Executed;
        Ok(())
    }
}
