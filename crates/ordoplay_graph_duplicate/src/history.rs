// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history of graph commands.

use crate::command::{CommandContext, CommandError, GraphCommand};
use std::collections::VecDeque;
use thiserror::Error;

/// Maximum undo history depth
pub const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Nothing to redo
    #[error("Nothing to redo")]
    NothingToRedo,

    /// The command itself failed
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// History statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Commands in undo stack
    pub undo_count: usize,
    /// Commands in redo stack
    pub redo_count: usize,
    /// Maximum history depth
    pub max_depth: usize,
}

/// Undo/redo history manager
pub struct History {
    /// Undo stack
    undo_stack: VecDeque<Box<dyn GraphCommand>>,
    /// Redo stack
    redo_stack: VecDeque<Box<dyn GraphCommand>>,
    /// Maximum history depth
    max_depth: usize,
}

impl History {
    /// Create a new history manager
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
        }
    }

    /// Execute a command and record it.
    ///
    /// A command that fails to execute is dropped and leaves the history as it was.
    pub fn execute(&mut self, mut command: Box<dyn GraphCommand>, ctx: &mut CommandContext<'_>) -> Result<()> {
        command.execute(ctx)?;
        tracing::debug!(command = command.description(), "Executed command");

        // Clear redo stack
        self.redo_stack.clear();
        self.undo_stack.push_back(command);

        // Enforce history limit
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        Ok(())
    }

    /// Undo the last command
    pub fn undo(&mut self, ctx: &mut CommandContext<'_>) -> Result<()> {
        let mut command = self.undo_stack.pop_back().ok_or(HistoryError::NothingToUndo)?;
        if let Err(err) = command.undo(ctx) {
            self.undo_stack.push_back(command);
            return Err(err.into());
        }
        tracing::debug!(command = command.description(), "Undid command");
        self.redo_stack.push_back(command);
        Ok(())
    }

    /// Redo the last undone command
    pub fn redo(&mut self, ctx: &mut CommandContext<'_>) -> Result<()> {
        let mut command = self.redo_stack.pop_back().ok_or(HistoryError::NothingToRedo)?;
        if let Err(err) = command.redo(ctx) {
            self.redo_stack.push_back(command);
            return Err(err.into());
        }
        tracing::debug!(command = command.description(), "Redid command");
        self.undo_stack.push_back(command);
        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get history statistics
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.undo_stack.len(),
            redo_count: self.redo_stack.len(),
            max_depth: self.max_depth,
        }
    }

    /// Get description of next undo command
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Get description of next redo command
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|c| c.description())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_depth())
            .field("redo", &self.redo_depth())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
