// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scoped subgraph duplication for `OrdoPlay` Editor.
//!
//! Copies a selection of nodes, together with the edges among them, into a
//! destination graph as one undoable [`DuplicateCommand`]:
//! - Clones get fresh identities, scope-unique names and shifted positions
//! - Edges are re-targeted onto the clones through per-kind protocols
//! - Failures are batched and reported once per command
//!
//! ## Architecture
//!
//! Every edit is a [`GraphCommand`] run against a [`CommandContext`], so
//! duplication composes with deletion (cut) and with the [`History`] stacks.

pub mod clone;
pub mod command;
pub mod config;
pub mod delete;
pub mod duplicate;
pub mod edge;
pub mod history;
pub mod naming;
pub mod offset;
pub mod present;
pub mod report;
pub mod resolve;
pub mod selection;

pub use clone::{clone_node, CloneError};
pub use command::{CommandContext, CommandError, CommandState, GraphCommand};
pub use config::{ConfigError, DuplicationConfig, CONFIG_FORMAT_VERSION, DEFAULT_PASTE_OFFSET};
pub use delete::DeleteNodesCommand;
pub use duplicate::DuplicateCommand;
pub use edge::CreateEdgeCommand;
pub use history::{History, HistoryError, HistoryStats, MAX_HISTORY};
pub use naming::{NameAllocator, SuffixNameAllocator};
pub use offset::PasteTarget;
pub use present::{NoopPresenter, RecordingPresenter, SelectionPresenter};
pub use report::{CollectingReporter, ErrorBatch, ErrorReporter, Message, Severity, TracingReporter};
pub use resolve::{EdgeResolver, Resolution, SkipReason};
pub use selection::{classify, Classified, EdgeReference, Selection, SelectionItem};
