// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undoable node deletion.

use crate::command::{CommandContext, CommandError, CommandState, GraphCommand};
use ordoplay_graph::{GraphId, GraphSet, NodeId, RemovedNode};

/// Command that deletes nodes, and every edge attached to them, from one graph
pub struct DeleteNodesCommand {
    graph: GraphId,
    nodes: Vec<NodeId>,
    removed: Vec<RemovedNode>,
    state: CommandState,
    description: String,
}

impl DeleteNodesCommand {
    /// Delete `nodes` from `graph`
    pub fn new(graph: GraphId, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        let description = if nodes.len() == 1 {
            "Delete node".to_string()
        } else {
            format!("Delete {} nodes", nodes.len())
        };
        Self {
            graph,
            nodes,
            removed: Vec::new(),
            state: CommandState::Idle,
            description,
        }
    }

    /// Lifecycle state
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Nodes this command deletes
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn remove(&mut self, graphs: &mut GraphSet) -> Result<(), CommandError> {
        let graph = graphs
            .graph_mut(self.graph)
            .ok_or(CommandError::GraphNotFound(self.graph))?;

        let mut removed = Vec::with_capacity(self.nodes.len());
        for &id in &self.nodes {
            match graph.remove_node(id) {
                Some(entry) => removed.push(entry),
                None => tracing::trace!(node = ?id, "Node already removed"),
            }
        }
        let edges: usize = removed.iter().map(|r| r.edges.len()).sum();
        tracing::debug!(nodes = removed.len(), edges, "Deleted nodes");
        self.removed = removed;
        Ok(())
    }
}

impl GraphCommand for DeleteNodesCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn can_execute(&self, graphs: &GraphSet) -> bool {
        graphs
            .graph(self.graph)
            .is_some_and(|g| !self.nodes.is_empty() && self.nodes.iter().all(|id| g.contains_node(*id)))
    }

    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Idle, "execute")?;
        if !self.can_execute(ctx.graphs) {
            return Err(CommandError::NotExecutable("nodes to delete not found".to_string()));
        }
        self.remove(ctx.graphs)?;
        self.state = CommandState::Executed;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Executed, "undo")?;
        let graph = ctx
            .graphs
            .graph_mut(self.graph)
            .ok_or(CommandError::GraphNotFound(self.graph))?;

        for entry in &self.removed {
            graph.check_insert(&entry.node)?;
        }

        // Replaying removals backwards puts every node and edge back in its slot
        for entry in std::mem::take(&mut self.removed).into_iter().rev() {
            graph.insert_node_at(entry.index, entry.node)?;
            for removed in entry.edges.into_iter().rev() {
                let edge = removed.edge;
                if graph.port(&edge.source).is_none() || graph.port(&edge.destination).is_none() {
                    tracing::trace!(edge = ?edge.id, "Not restoring edge to a missing node");
                    continue;
                }
                graph.insert_edge_at(removed.index, edge)?;
            }
        }

        self.state = CommandState::Undone;
        Ok(())
    }

    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Undone, "redo")?;
        self.remove(ctx.graphs)?;
        self.state = CommandState::Executed;
        Ok(())
    }
}
