// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undoable duplication of a selection into a destination graph.
//!
//! [`DuplicateCommand`] clones the selected nodes into the destination graph,
//! re-creates the selected edges against the clones (or against untouched
//! originals when copying within one graph) and records everything it created
//! so that undo and redo replay the exact same nodes and edges.
//!
//! Problems with individual nodes or edges never abort the batch. Nodes that
//! cannot be cloned are reported once, together, when the batch is finished;
//! edges that cannot be resolved are dropped silently.

use crate::clone::{clone_node, CloneError};
use crate::command::{CommandContext, CommandError, CommandState, GraphCommand};
use crate::config::DuplicationConfig;
use crate::edge::CreateEdgeCommand;
use crate::naming::{NameAllocator, SuffixNameAllocator};
use crate::offset::PasteTarget;
use crate::report::{ErrorBatch, Message};
use crate::resolve::EdgeResolver;
use crate::selection::{classify, Selection};
use indexmap::IndexMap;
use ordoplay_graph::{Delta, EdgeId, Graph, GraphId, GraphSet, NodeId, Position, RemovedNode};

/// Command that duplicates a selection into a graph
pub struct DuplicateCommand {
    selection: Selection,
    destination: GraphId,
    target: PasteTarget,
    config: DuplicationConfig,
    names: Box<dyn NameAllocator>,
    follow_up: Option<Box<dyn GraphCommand>>,
    description: String,
    state: CommandState,
    originals: Vec<NodeId>,
    mapping: IndexMap<NodeId, NodeId>,
    edges: Vec<CreateEdgeCommand>,
    /// Clones taken out of the graph by undo, in creation order
    parked: Vec<RemovedNode>,
}

impl DuplicateCommand {
    /// Create a duplication of `selection` into `destination`
    pub fn new(selection: Selection, destination: GraphId) -> Self {
        let config = DuplicationConfig::default();
        Self {
            selection,
            destination,
            target: PasteTarget::Default,
            names: Box::new(SuffixNameAllocator::new(config.name_separator.clone())),
            config,
            follow_up: None,
            description: "Duplicate Nodes".to_string(),
            state: CommandState::Idle,
            originals: Vec::new(),
            mapping: IndexMap::new(),
            edges: Vec::new(),
            parked: Vec::new(),
        }
    }

    /// Place the top-left corner of the duplicated nodes at `point`
    pub fn at(mut self, point: Position) -> Self {
        self.target = PasteTarget::At(point);
        self
    }

    /// Shift the duplicated nodes by exactly `delta`
    pub fn offset_by(mut self, delta: Delta) -> Self {
        self.target = PasteTarget::Offset(delta);
        self
    }

    /// Apply settings; also resets the name allocator to the configured separator
    pub fn with_config(mut self, config: DuplicationConfig) -> Self {
        self.names = Box::new(SuffixNameAllocator::new(config.name_separator.clone()));
        self.config = config;
        self
    }

    /// Use a custom name allocator
    pub fn with_name_allocator(mut self, names: Box<dyn NameAllocator>) -> Self {
        self.names = names;
        self
    }

    /// Set the description shown in the history
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Compose a command that runs after this one on execute, undo and redo.
    ///
    /// Used for cut: the removal of the originals follows the duplication in
    /// every direction, so each step sees a consistent graph. When the
    /// follow-up fails, this command's own step is reverted as well.
    pub fn then(mut self, follow_up: Box<dyn GraphCommand>) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    /// Lifecycle state
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Destination graph
    pub fn destination(&self) -> GraphId {
        self.destination
    }

    /// Original to clone mapping, in duplication order
    pub fn mapping(&self) -> &IndexMap<NodeId, NodeId> {
        &self.mapping
    }

    /// Clone created for `original`
    pub fn clone_of(&self, original: NodeId) -> Option<NodeId> {
        self.mapping.get(&original).copied()
    }

    /// IDs of all cloned nodes
    pub fn cloned_nodes(&self) -> Vec<NodeId> {
        self.mapping.values().copied().collect()
    }

    /// IDs of all created edges
    pub fn created_edges(&self) -> Vec<EdgeId> {
        self.edges.iter().filter_map(CreateEdgeCommand::edge_id).collect()
    }

    fn duplicate_node(&self, graphs: &mut GraphSet, original: NodeId, delta: Delta) -> Result<NodeId, CloneError> {
        let node = graphs.find_node(original).ok_or(CloneError::NodeNotFound(original))?;
        let scope = graphs
            .graph(self.destination)
            .ok_or(CloneError::ScopeNotFound(self.destination))?;
        let clone = clone_node(node, scope, delta, self.names.as_ref())?;
        let name = node.name.clone();

        let scope = graphs
            .graph_mut(self.destination)
            .ok_or(CloneError::ScopeNotFound(self.destination))?;
        scope
            .insert_node(clone)
            .map_err(|source| CloneError::Insert { node: name, source })
    }

    /// Take the created edges and clones back out of `graph`, returning the clones in creation order
    fn withdraw(&mut self, graph: &mut Graph) -> Result<Vec<RemovedNode>, CommandError> {
        for command in self.edges.iter_mut().rev() {
            if command.state() == CommandState::Executed {
                command.undo(graph)?;
            }
        }
        let mut parked: Vec<RemovedNode> = self
            .mapping
            .values()
            .rev()
            .filter_map(|clone| graph.remove_node(*clone))
            .collect();
        parked.reverse();
        Ok(parked)
    }

    /// Put the parked clones and their edges back, or leave `graph` untouched.
    ///
    /// Clones are appended as on execute unless `in_place`, which returns them
    /// to the slots they were withdrawn from.
    fn restore(&mut self, graph: &mut Graph, in_place: bool) -> Result<(), CommandError> {
        for entry in &self.parked {
            graph.check_insert(&entry.node)?;
        }
        for entry in std::mem::take(&mut self.parked) {
            if in_place {
                graph.insert_node_at(entry.index, entry.node)?;
            } else {
                graph.insert_node(entry.node)?;
            }
        }

        let failed = self
            .edges
            .iter_mut()
            .map(|command| command.redo(graph))
            .find_map(Result::err);
        if let Some(err) = failed {
            self.parked = self.withdraw(graph)?;
            return Err(err);
        }
        Ok(())
    }

    fn present_result(&self, ctx: &mut CommandContext<'_>) {
        if self.config.select_result {
            ctx.presenter.select(&self.cloned_nodes(), &self.created_edges());
        }
    }

    fn present_originals(&self, ctx: &mut CommandContext<'_>) {
        if self.config.select_result {
            let originals: Vec<NodeId> = self
                .originals
                .iter()
                .copied()
                .filter(|id| ctx.graphs.find_node(*id).is_some())
                .collect();
            ctx.presenter.select(&originals, &[]);
        }
    }
}

impl GraphCommand for DuplicateCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn can_execute(&self, graphs: &GraphSet) -> bool {
        graphs.contains(self.destination)
            && !self.selection.is_empty()
            && self.follow_up.as_ref().map_or(true, |f| f.can_execute(graphs))
    }

    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Idle, "execute")?;
        if !ctx.graphs.contains(self.destination) {
            return Err(CommandError::GraphNotFound(self.destination));
        }
        if self.selection.is_empty() {
            return Err(CommandError::NotExecutable("nothing selected".to_string()));
        }
        if let Some(follow_up) = self.follow_up.as_ref() {
            if !follow_up.can_execute(ctx.graphs) {
                return Err(CommandError::NotExecutable(format!(
                    "'{}' cannot follow the duplication",
                    follow_up.description()
                )));
            }
        }

        let (classified, delta) = {
            let graphs: &GraphSet = ctx.graphs;
            let classified = classify(&self.selection, graphs);
            let delta = self.target.delta(
                classified.nodes.iter().filter_map(|id| graphs.find_node(*id)),
                self.config.default_offset,
            );
            (classified, delta)
        };
        let delta = delta.ok_or_else(|| CommandError::NotExecutable("paste position out of range".to_string()))?;
        let same_scope = classified.source_scope == Some(self.destination);

        let mut errors = ErrorBatch::new();
        errors.pause();

        for &original in &classified.nodes {
            match self.duplicate_node(ctx.graphs, original, delta) {
                Ok(clone) => {
                    self.mapping.insert(original, clone);
                }
                Err(err) => errors.push(err.to_message(original), &mut *ctx.reporter),
            }
        }
        self.originals = classified.nodes;

        let batch = {
            let graphs: &GraphSet = ctx.graphs;
            let destination = graphs
                .graph(self.destination)
                .ok_or(CommandError::GraphNotFound(self.destination))?;
            let mut resolver = EdgeResolver::new(graphs, destination, &self.mapping, same_scope);
            for reference in &classified.edges {
                resolver.resolve(reference);
            }
            resolver.into_batch()
        };

        let graph = ctx
            .graphs
            .graph_mut(self.destination)
            .ok_or(CommandError::GraphNotFound(self.destination))?;
        for mut command in batch {
            match command.execute(graph) {
                Ok(_) => self.edges.push(command),
                Err(err) => errors.push(Message::error(format!("Cannot create edge: {err}")), &mut *ctx.reporter),
            }
        }

        let reported = errors.flush(&mut *ctx.reporter);
        self.state = CommandState::Executed;
        tracing::debug!(
            nodes = self.mapping.len(),
            edges = self.edges.len(),
            skipped_edges = classified.edges.len() - self.edges.len(),
            reported,
            ?delta,
            "Duplicated selection"
        );

        let result = match self.follow_up.as_mut() {
            Some(follow_up) => follow_up.execute(ctx),
            None => Ok(()),
        };
        if let Err(err) = result {
            let graph = ctx
                .graphs
                .graph_mut(self.destination)
                .ok_or(CommandError::GraphNotFound(self.destination))?;
            self.withdraw(graph)?;
            self.mapping.clear();
            self.edges.clear();
            self.originals.clear();
            self.state = CommandState::Idle;
            tracing::debug!(error = %err, "Rolled back duplication");
            return Err(err);
        }

        self.present_result(ctx);
        Ok(())
    }

    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Executed, "undo")?;
        let graph = ctx
            .graphs
            .graph_mut(self.destination)
            .ok_or(CommandError::GraphNotFound(self.destination))?;
        if let Some(missing) = self.mapping.values().find(|clone| !graph.contains_node(**clone)) {
            return Err(CommandError::NodeNotFound(*missing));
        }

        self.parked = self.withdraw(graph)?;
        self.state = CommandState::Undone;
        tracing::debug!(nodes = self.parked.len(), edges = self.edges.len(), "Undid duplication");

        let result = match self.follow_up.as_mut() {
            Some(follow_up) => follow_up.undo(ctx),
            None => Ok(()),
        };
        if let Err(err) = result {
            let graph = ctx
                .graphs
                .graph_mut(self.destination)
                .ok_or(CommandError::GraphNotFound(self.destination))?;
            self.restore(graph, true)?;
            self.state = CommandState::Executed;
            return Err(err);
        }

        self.present_originals(ctx);
        Ok(())
    }

    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        self.state.require(CommandState::Undone, "redo")?;
        let graph = ctx
            .graphs
            .graph_mut(self.destination)
            .ok_or(CommandError::GraphNotFound(self.destination))?;

        self.restore(graph, false)?;
        self.state = CommandState::Executed;
        tracing::debug!(nodes = self.mapping.len(), edges = self.edges.len(), "Redid duplication");

        let result = match self.follow_up.as_mut() {
            Some(follow_up) => follow_up.redo(ctx),
            None => Ok(()),
        };
        if let Err(err) = result {
            let graph = ctx
                .graphs
                .graph_mut(self.destination)
                .ok_or(CommandError::GraphNotFound(self.destination))?;
            self.parked = self.withdraw(graph)?;
            self.state = CommandState::Undone;
            return Err(err);
        }

        self.present_result(ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::RecordingPresenter;
    use crate::report::CollectingReporter;
    use crate::selection::SelectionItem;
    use crate::delete::DeleteNodesCommand;
    use crate::history::History;
    use ordoplay_graph::{Endpoint, Node, Port, PortType, RoutingData};

    /// Follow-up that passes its precondition but fails to run
    struct Refuses;

    impl GraphCommand for Refuses {
        fn description(&self) -> &str {
            "Refuse"
        }

        fn can_execute(&self, _graphs: &GraphSet) -> bool {
            true
        }

        fn execute(&mut self, _ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
            Err(CommandError::NotExecutable("refused".to_string()))
        }

        fn undo(&mut self, _ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
            Ok(())
        }

        fn redo(&mut self, _ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn pair() -> (GraphSet, GraphId, NodeId, NodeId) {
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 0, 0)).unwrap();
        let b = graph.insert_node(block("B", 100, 0)).unwrap();
        graph
            .connect(Endpoint::new(a, "OUT"), Endpoint::new(b, "IN"), RoutingData::default())
            .unwrap();
        let mut graphs = GraphSet::new();
        let id = graphs.add_graph(graph);
        (graphs, id, a, b)
    }

    fn block(name: &str, x: i32, y: i32) -> Node {
        Node::named(name)
            .with_position(x, y)
            .with_port(Port::input("IN", PortType::Int))
            .with_port(Port::output("OUT", PortType::Int))
    }

    #[test]
    fn test_state_machine_guards() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 0, 0)).unwrap();
        let id = graphs.add_graph(graph);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let mut cmd = DuplicateCommand::new(Selection::from_nodes([a]), id);
        assert!(matches!(cmd.undo(&mut ctx), Err(CommandError::InvalidState { .. })));
        assert!(matches!(cmd.redo(&mut ctx), Err(CommandError::InvalidState { .. })));

        cmd.execute(&mut ctx).unwrap();
        assert!(cmd.execute(&mut ctx).is_err());
        assert!(cmd.redo(&mut ctx).is_err());

        cmd.undo(&mut ctx).unwrap();
        assert!(cmd.execute(&mut ctx).is_err());
        assert!(cmd.undo(&mut ctx).is_err());
        cmd.redo(&mut ctx).unwrap();
        assert_eq!(cmd.state(), CommandState::Executed);
    }

    #[test]
    fn test_not_executable_without_destination_or_selection() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 0, 0)).unwrap();
        let id = graphs.add_graph(graph);

        let missing = DuplicateCommand::new(Selection::from_nodes([a]), GraphId::new());
        assert!(!missing.can_execute(&graphs));
        let empty = DuplicateCommand::new(Selection::new(), id);
        assert!(!empty.can_execute(&graphs));

        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);
        let mut empty = empty;
        assert!(matches!(empty.execute(&mut ctx), Err(CommandError::NotExecutable(_))));
        assert_eq!(empty.state(), CommandState::Idle);
        assert_eq!(ctx.graphs.graph(id).unwrap().node_count(), 1);
    }

    #[test]
    fn test_default_offset_and_selection_transfer() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 100, 50)).unwrap();
        let id = graphs.add_graph(graph);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();

        let selection = Selection::from_nodes([a]).with(SelectionItem::Other("note".into()));
        let mut cmd = DuplicateCommand::new(selection, id);
        cmd.execute(&mut CommandContext::new(&mut graphs, &mut presenter, &mut reporter))
            .unwrap();
        let clone = cmd.clone_of(a).unwrap();
        assert_eq!(graphs.find_node(clone).unwrap().position, Position::new(120, 70));
        assert_eq!(presenter.nodes, vec![clone]);

        cmd.undo(&mut CommandContext::new(&mut graphs, &mut presenter, &mut reporter))
            .unwrap();
        assert_eq!(presenter.nodes, vec![a]);
        assert_eq!(presenter.changes, 2);
    }

    #[test]
    fn test_selection_not_transferred_when_disabled() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 0, 0)).unwrap();
        let id = graphs.add_graph(graph);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();

        {
            let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);
            let config = DuplicationConfig {
                select_result: false,
                ..DuplicationConfig::default()
            };
            let mut cmd = DuplicateCommand::new(Selection::from_nodes([a]), id).with_config(config);
            cmd.execute(&mut ctx).unwrap();
        }
        assert_eq!(presenter.changes, 0);
    }

    #[test]
    fn test_missing_node_reported_once() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", 0, 0)).unwrap();
        let id = graphs.add_graph(graph);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();

        let ghost_one = NodeId::new();
        let ghost_two = NodeId::new();
        {
            let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);
            let mut cmd = DuplicateCommand::new(Selection::from_nodes([ghost_one, a, ghost_two]), id);
            cmd.execute(&mut ctx).unwrap();
            assert_eq!(cmd.mapping().len(), 1);
        }
        assert_eq!(reporter.batches().len(), 1);
        assert_eq!(reporter.batches()[0].len(), 2);
        assert_eq!(reporter.batches()[0][0].node, Some(ghost_one));
        assert_eq!(graphs.graph(id).unwrap().node_count(), 2);
    }

    #[test]
    fn test_follow_up_checked_before_cloning() {
        let (mut graphs, id, a, _) = pair();
        let before: Vec<NodeId> = graphs.graph(id).unwrap().node_ids().collect();
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let cut = DuplicateCommand::new(Selection::from_nodes([a]), id)
            .then(Box::new(DeleteNodesCommand::new(id, [a, NodeId::new()])));
        assert!(!cut.can_execute(ctx.graphs));

        let mut history = History::new();
        assert!(history.execute(Box::new(cut), &mut ctx).is_err());
        assert!(!history.can_undo());
        assert_eq!(ctx.graphs.graph(id).unwrap().node_ids().collect::<Vec<_>>(), before);
        assert_eq!(presenter.changes, 0);
    }

    #[test]
    fn test_failed_follow_up_rolls_back() {
        let (mut graphs, id, a, b) = pair();
        let before = graphs.clone();
        let edge_order: Vec<EdgeId> = graphs.graph(id).unwrap().edges().map(|e| e.id).collect();
        let selection = Selection::with_attached_edges(graphs.graph(id).unwrap(), &[a, b]);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let mut cmd = DuplicateCommand::new(selection, id).then(Box::new(Refuses));
        assert!(matches!(cmd.execute(&mut ctx), Err(CommandError::NotExecutable(_))));
        assert_eq!(cmd.state(), CommandState::Idle);
        assert!(cmd.mapping().is_empty());
        assert!(cmd.created_edges().is_empty());

        assert_eq!(*ctx.graphs, before);
        let graph = ctx.graphs.graph(id).unwrap();
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(graph.edges().map(|e| e.id).collect::<Vec<_>>(), edge_order);
    }

    #[test]
    fn test_redo_blocked_by_name_clash_changes_nothing() {
        let (mut graphs, id, a, b) = pair();
        let selection = Selection::with_attached_edges(graphs.graph(id).unwrap(), &[a, b]);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let mut cmd = DuplicateCommand::new(selection, id);
        cmd.execute(&mut ctx).unwrap();
        let clone_a = cmd.clone_of(a).unwrap();
        let clone_b = cmd.clone_of(b).unwrap();
        let clone_b_name = ctx.graphs.graph(id).unwrap().node(clone_b).unwrap().name.clone();
        assert_eq!(ctx.graphs.graph(id).unwrap().edge_count(), 2);

        cmd.undo(&mut ctx).unwrap();
        let foreign = ctx
            .graphs
            .graph_mut(id)
            .unwrap()
            .insert_node(block(&clone_b_name, 0, 0))
            .unwrap();

        assert!(cmd.redo(&mut ctx).is_err());
        assert_eq!(cmd.state(), CommandState::Undone);
        let graph = ctx.graphs.graph(id).unwrap();
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![a, b, foreign]);
        assert_eq!(graph.edge_count(), 1);

        ctx.graphs.graph_mut(id).unwrap().remove_node(foreign);
        cmd.redo(&mut ctx).unwrap();
        let graph = ctx.graphs.graph(id).unwrap();
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![a, b, clone_a, clone_b]);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph
            .find_edge(&Endpoint::new(clone_a, "OUT"), &Endpoint::new(clone_b, "IN"))
            .is_some());
    }

    #[test]
    fn test_failed_follow_up_undo_keeps_clones() {
        let (mut graphs, id, a, b) = pair();
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let mut cut = DuplicateCommand::new(Selection::from_nodes([a]), id)
            .then(Box::new(DeleteNodesCommand::new(id, [a])));
        cut.execute(&mut ctx).unwrap();
        let clone = cut.clone_of(a).unwrap();
        let foreign = ctx.graphs.graph_mut(id).unwrap().insert_node(block("A", 0, 0)).unwrap();

        assert!(cut.undo(&mut ctx).is_err());
        assert_eq!(cut.state(), CommandState::Executed);
        let graph = ctx.graphs.graph(id).unwrap();
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec![b, clone, foreign]);
        assert!(!graph.contains_node(a));
    }

    #[test]
    fn test_unreachable_drop_point_not_executable() {
        let mut graphs = GraphSet::new();
        let mut graph = Graph::new("Net");
        let a = graph.insert_node(block("A", i32::MIN, 0)).unwrap();
        let id = graphs.add_graph(graph);
        let mut presenter = RecordingPresenter::default();
        let mut reporter = CollectingReporter::new();
        let mut ctx = CommandContext::new(&mut graphs, &mut presenter, &mut reporter);

        let mut cmd = DuplicateCommand::new(Selection::from_nodes([a]), id).at(Position::new(i32::MAX, 0));
        assert!(matches!(cmd.execute(&mut ctx), Err(CommandError::NotExecutable(_))));
        assert_eq!(cmd.state(), CommandState::Idle);
        assert_eq!(ctx.graphs.graph(id).unwrap().node_count(), 1);
    }
}
