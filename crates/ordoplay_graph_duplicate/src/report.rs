// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deferred reporting of non-fatal problems.
//!
//! A duplication collects its problems in an [`ErrorBatch`] while it runs and
//! hands them to an [`ErrorReporter`] in one go once the batch is finished.

use ordoplay_graph::NodeId;
use serde::{Deserialize, Serialize};

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Something was skipped
    Warning,
    /// Something failed
    Error,
}

/// A user-facing diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity
    pub severity: Severity,
    /// Human-readable text
    pub text: String,
    /// Node the message is about, if any
    pub node: Option<NodeId>,
}

impl Message {
    /// Create an error message
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
            node: None,
        }
    }

    /// Create a warning message
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
            node: None,
        }
    }

    /// Attach the node the message is about
    pub fn for_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }
}

/// Sink that surfaces messages to the user
pub trait ErrorReporter {
    /// Show a batch of messages
    fn report(&mut self, messages: Vec<Message>);
}

/// Reporter that writes every message to the `tracing` log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&mut self, messages: Vec<Message>) {
        for message in messages {
            match message.severity {
                Severity::Error => tracing::error!(node = ?message.node, "{}", message.text),
                Severity::Warning => tracing::warn!(node = ?message.node, "{}", message.text),
            }
        }
    }
}

/// Reporter that keeps every batch it receives
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    batches: Vec<Vec<Message>>,
}

impl CollectingReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches received so far, oldest first
    pub fn batches(&self) -> &[Vec<Message>] {
        &self.batches
    }

    /// All messages received so far
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.batches.iter().flatten()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&mut self, messages: Vec<Message>) {
        self.batches.push(messages);
    }
}

/// Accumulator for messages raised during one batch operation
#[derive(Debug, Default)]
pub struct ErrorBatch {
    paused: bool,
    buffered: Vec<Message>,
}

impl ErrorBatch {
    /// Create an accumulator that reports immediately until paused
    pub fn new() -> Self {
        Self::default()
    }

    /// Start buffering messages
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Whether messages are being buffered
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop buffering and take everything buffered so far
    pub fn unpause(&mut self) -> Vec<Message> {
        self.paused = false;
        std::mem::take(&mut self.buffered)
    }

    /// Buffer a message, or report it right away when not paused
    pub fn push(&mut self, message: Message, reporter: &mut dyn ErrorReporter) {
        if self.paused {
            self.buffered.push(message);
        } else {
            reporter.report(vec![message]);
        }
    }

    /// Unpause and hand all buffered messages to `reporter` as one batch.
    ///
    /// Nothing is reported when the batch is empty.
    pub fn flush(&mut self, reporter: &mut dyn ErrorReporter) -> usize {
        let messages = self.unpause();
        let count = messages.len();
        if count > 0 {
            reporter.report(messages);
        }
        count
    }
}
