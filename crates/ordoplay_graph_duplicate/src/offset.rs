// SPDX-License-Identifier: MIT OR Apache-2.0
//! Placement of duplicated nodes.

use ordoplay_graph::{Delta, Node, Position};
use serde::{Deserialize, Serialize};

/// Where the duplicated nodes should land
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasteTarget {
    /// No drop location (keyboard paste): shift by the configured default offset
    #[default]
    Default,
    /// Move the top-left corner of the selection to this point
    At(Position),
    /// Shift by exactly this offset
    Offset(Delta),
}

/// Top-left corner of the bounding box of `nodes`
pub fn origin<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Option<Position> {
    nodes.into_iter().map(|n| n.position).reduce(|a, b| Position {
        x: a.x.min(b.x),
        y: a.y.min(b.y),
    })
}

impl PasteTarget {
    /// Offset applied to every duplicated node.
    ///
    /// `None` when the distance from the selection to the drop point does not fit in `i32`.
    pub fn delta<'a>(&self, nodes: impl IntoIterator<Item = &'a Node>, default_offset: Delta) -> Option<Delta> {
        match *self {
            Self::Offset(delta) => Some(delta),
            Self::At(point) => match origin(nodes) {
                Some(o) => point.delta_from(o),
                None => Some(Delta::default()),
            },
            Self::Default => Some(default_offset),
        }
    }
}
