// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undoable graph commands.
//!
//! Commands encapsulate graph edits and integrate with the
//! [`crate::history::History`] stacks.

use crate::present::SelectionPresenter;
use crate::report::ErrorReporter;
use ordoplay_graph::{ConnectionError, GraphError, GraphId, GraphSet, NodeId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommandState {
    /// Not yet executed
    #[default]
    Idle,
    /// Executed or redone
    Executed,
    /// Undone
    Undone,
}

/// Everything a command may touch while it runs
pub struct CommandContext<'a> {
    /// Graphs being edited
    pub graphs: &'a mut GraphSet,
    /// Front-end selection hook
    pub presenter: &'a mut dyn SelectionPresenter,
    /// Sink for user-facing messages
    pub reporter: &'a mut dyn ErrorReporter,
}

impl<'a> CommandContext<'a> {
    /// Create a new context
    pub fn new(
        graphs: &'a mut GraphSet,
        presenter: &'a mut dyn SelectionPresenter,
        reporter: &'a mut dyn ErrorReporter,
    ) -> Self {
        Self {
            graphs,
            presenter,
            reporter,
        }
    }
}

/// Trait for graph edits that can be undone/redone
pub trait GraphCommand {
    /// Get a description of this command
    fn description(&self) -> &str;

    /// Check the preconditions for [`GraphCommand::execute`]
    fn can_execute(&self, graphs: &GraphSet) -> bool;

    /// Execute the command
    fn execute(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError>;

    /// Revert the effects of the last execute/redo
    fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError>;

    /// Re-apply the effects reverted by the last undo
    fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError>;
}

/// Error type for command execution
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Preconditions are not met
    #[error("Command cannot execute: {0}")]
    NotExecutable(String),

    /// Operation not valid in the current lifecycle state
    #[error("Cannot {action} while {state:?}")]
    InvalidState {
        /// Requested operation
        action: &'static str,
        /// Current state
        state: CommandState,
    },

    /// Graph not found
    #[error("Graph not found: {0:?}")]
    GraphNotFound(GraphId),

    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Graph mutation failed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Edge creation failed
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl CommandState {
    /// Require `self` to be `expected` before running `action`
    pub fn require(self, expected: CommandState, action: &'static str) -> Result<(), CommandError> {
        if self == expected {
            Ok(())
        } else {
            Err(CommandError::InvalidState { action, state: self })
        }
    }
}
