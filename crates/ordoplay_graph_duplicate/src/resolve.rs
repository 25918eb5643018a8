// SPDX-License-Identifier: MIT OR Apache-2.0
//! Re-targeting copied edges onto duplicated nodes.

use crate::edge::CreateEdgeCommand;
use crate::selection::EdgeReference;
use indexmap::IndexMap;
use ordoplay_graph::{Endpoint, Graph, GraphSet, NodeId, PortKind};

/// Why an edge reference produced no edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither endpoint node was duplicated
    Untouched,
    /// The source port could not be found to pick a protocol
    UnknownSourcePort,
    /// An endpoint was not duplicated and cannot be shared across scopes
    Unresolved,
    /// The resolved edge failed validation
    Invalid,
}

/// Outcome of resolving one edge reference
#[derive(Debug)]
pub enum Resolution {
    /// The edge was added to the pending batch
    Staged,
    /// The edge was dropped
    Skipped(SkipReason),
}

/// Turns edge references into a batch of edge-creation commands
pub struct EdgeResolver<'a> {
    graphs: &'a GraphSet,
    destination: &'a Graph,
    mapping: &'a IndexMap<NodeId, NodeId>,
    same_scope: bool,
    batch: Vec<CreateEdgeCommand>,
}

impl<'a> EdgeResolver<'a> {
    /// Create a resolver.
    ///
    /// `mapping` maps original nodes to their clones, which already live in
    /// `destination`. `same_scope` is true when the originals also belong to
    /// `destination`, so edges may keep pointing at undisturbed originals.
    pub fn new(
        graphs: &'a GraphSet,
        destination: &'a Graph,
        mapping: &'a IndexMap<NodeId, NodeId>,
        same_scope: bool,
    ) -> Self {
        Self {
            graphs,
            destination,
            mapping,
            same_scope,
            batch: Vec::new(),
        }
    }

    /// Resolve one reference, staging a command if it yields a valid edge
    pub fn resolve(&mut self, reference: &EdgeReference) -> Resolution {
        let outcome = self.try_resolve(reference);
        if let Err(reason) = outcome {
            tracing::trace!(
                source = %reference.source.port,
                destination = %reference.destination.port,
                ?reason,
                "Skipping edge"
            );
            return Resolution::Skipped(reason);
        }
        Resolution::Staged
    }

    fn try_resolve(&mut self, reference: &EdgeReference) -> Result<(), SkipReason> {
        let source_clone = self.mapping.get(&reference.source.node).copied();
        let destination_clone = self.mapping.get(&reference.destination.node).copied();
        if source_clone.is_none() && destination_clone.is_none() {
            return Err(SkipReason::Untouched);
        }

        let kind = self
            .source_kind(&reference.source, source_clone)
            .ok_or(SkipReason::UnknownSourcePort)?;

        let source = self
            .resolve_endpoint(&reference.source, source_clone)
            .ok_or(SkipReason::Unresolved)?;
        let destination = self
            .resolve_endpoint(&reference.destination, destination_clone)
            .ok_or(SkipReason::Unresolved)?;

        let mut command = CreateEdgeCommand::for_kind(kind);
        command.set_source(source);
        command.set_destination(destination);
        command.set_routing(reference.routing);

        if !command.can_execute(self.destination, &self.batch) {
            return Err(SkipReason::Invalid);
        }
        self.batch.push(command);
        Ok(())
    }

    /// Kind declared by the source port, read from the original if it still exists
    fn source_kind(&self, source: &Endpoint, clone: Option<NodeId>) -> Option<PortKind> {
        let original = self.graphs.find_node(source.node);
        let copy = clone.and_then(|id| self.destination.node(id));
        original
            .or(copy)
            .and_then(|node| node.port(&source.port))
            .map(|port| port.kind())
    }

    fn resolve_endpoint(&self, endpoint: &Endpoint, clone: Option<NodeId>) -> Option<Endpoint> {
        match clone {
            Some(id) => Some(Endpoint::new(id, endpoint.port.clone())),
            None if self.same_scope && self.destination.contains_node(endpoint.node) => {
                Some(endpoint.clone())
            }
            None => None,
        }
    }

    /// Commands staged so far, in staging order
    pub fn batch(&self) -> &[CreateEdgeCommand] {
        &self.batch
    }

    /// Take the staged commands
    pub fn into_batch(self) -> Vec<CreateEdgeCommand> {
        self.batch
    }
}
