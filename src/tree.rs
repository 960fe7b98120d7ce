//! Element tree simplification.

use serde_json::{Map, Value};
use tracing::debug;

/// Node fields that the import never needs. Stripped at every depth.
pub const METADATA_FIELDS: [&str; 6] = [
    "htmlMetadata",
    "debugInfo",
    "sourceSelector",
    "componentSignature",
    "contentHash",
    "cssVariables",
];

pub const CHILDREN: &str = "children";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes visited, including the ones at the cutoff depth.
    pub nodes_visited: usize,
    pub metadata_removed: usize,
    /// Nodes whose `children` were cleared by the depth limit.
    pub truncated: usize,
}

/// Strip metadata from `root` and its descendants, and clear the children of
/// every node at `max_depth`. The root is depth 0.
pub fn simplify_tree(root: &mut Map<String, Value>, max_depth: usize) -> TreeStats {
    let mut stats = TreeStats::default();
    simplify_node(root, max_depth, 0, &mut stats);
    stats
}

fn simplify_node(
    node: &mut Map<String, Value>,
    max_depth: usize,
    depth: usize,
    stats: &mut TreeStats,
) {
    stats.nodes_visited += 1;

    for field in METADATA_FIELDS {
        if node.shift_remove(field).is_some() {
            stats.metadata_removed += 1;
        }
    }

    if depth >= max_depth {
        if let Some(children) = node.get_mut(CHILDREN) {
            if !matches!(children, Value::Array(c) if c.is_empty()) {
                debug!(depth, "truncating tree");
                stats.truncated += 1;
            }
            *children = Value::Array(Vec::new());
        }
        return;
    }

    if let Some(Value::Array(children)) = node.get_mut(CHILDREN) {
        for child in children.iter_mut().filter_map(Value::as_object_mut) {
            simplify_node(child, max_depth, depth + 1, stats);
        }
    }
}
