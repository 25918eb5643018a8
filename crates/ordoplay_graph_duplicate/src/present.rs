// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection hand-off to the editor front end.

use ordoplay_graph::{EdgeId, NodeId};

/// Front-end hook that moves the visible selection
pub trait SelectionPresenter {
    /// Replace the current selection
    fn select(&mut self, nodes: &[NodeId], edges: &[EdgeId]);
}

/// Presenter that ignores selection changes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl SelectionPresenter for NoopPresenter {
    fn select(&mut self, _nodes: &[NodeId], _edges: &[EdgeId]) {}
}

/// Presenter that remembers the most recent selection
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    /// Selected nodes
    pub nodes: Vec<NodeId>,
    /// Selected edges
    pub edges: Vec<EdgeId>,
    /// Number of selection changes seen
    pub changes: usize,
}

impl SelectionPresenter for RecordingPresenter {
    fn select(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        self.nodes = nodes.to_vec();
        self.edges = edges.to_vec();
        self.changes += 1;
    }
}
