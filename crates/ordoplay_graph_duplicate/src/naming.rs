// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unique node naming within a scope.

use ordoplay_graph::{Graph, Node};

/// Source of node names that are unique within a graph
pub trait NameAllocator {
    /// Return a name based on `base` that no node in `scope` currently uses
    fn unique_name(&self, scope: &Graph, node: &Node, base: &str) -> String;
}

/// Allocator that appends an increasing counter, e.g. `E_CYCLE`, `E_CYCLE_1`
#[derive(Debug, Clone)]
pub struct SuffixNameAllocator {
    separator: String,
}

impl SuffixNameAllocator {
    /// Create an allocator using `separator` before the counter
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Strip an existing `<separator><digits>` counter from a name
    fn stem<'a>(&self, name: &'a str) -> &'a str {
        if self.separator.is_empty() {
            return name;
        }
        match name.rsplit_once(self.separator.as_str()) {
            Some((stem, counter))
                if !stem.is_empty()
                    && !counter.is_empty()
                    && counter.bytes().all(|b| b.is_ascii_digit()) =>
            {
                stem
            }
            _ => name,
        }
    }
}

impl Default for SuffixNameAllocator {
    fn default() -> Self {
        Self::new("_")
    }
}

impl NameAllocator for SuffixNameAllocator {
    fn unique_name(&self, scope: &Graph, _node: &Node, base: &str) -> String {
        if !base.is_empty() && !scope.contains_name(base) {
            return base.to_string();
        }

        let stem = if base.is_empty() { "Node" } else { self.stem(base) };
        (1u64..)
            .map(|n| format!("{stem}{}{n}", self.separator))
            .find(|candidate| !scope.contains_name(candidate))
            .unwrap_or_else(|| stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(names: &[&str]) -> Graph {
        let mut graph = Graph::new("Scope");
        for name in names {
            graph.insert_node(Node::named(*name)).unwrap();
        }
        graph
    }

    #[test]
    fn test_free_name_kept() {
        let graph = scope(&["A"]);
        let names = SuffixNameAllocator::default();
        assert_eq!(names.unique_name(&graph, &Node::named("B"), "B"), "B");
    }

    #[test]
    fn test_counter_appended() {
        let graph = scope(&["CTU", "CTU_1"]);
        let names = SuffixNameAllocator::default();
        assert_eq!(names.unique_name(&graph, &Node::named("CTU"), "CTU"), "CTU_2");
    }

    #[test]
    fn test_existing_counter_replaced() {
        let graph = scope(&["CTU", "CTU_1"]);
        let names = SuffixNameAllocator::default();
        assert_eq!(names.unique_name(&graph, &Node::named("CTU_1"), "CTU_1"), "CTU_2");
    }

    #[test]
    fn test_custom_separator() {
        let graph = scope(&["Timer"]);
        let names = SuffixNameAllocator::new("-");
        assert_eq!(names.unique_name(&graph, &Node::named("Timer"), "Timer"), "Timer-1");
    }
}
