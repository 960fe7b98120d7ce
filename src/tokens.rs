//! Design token truncation.

use serde_json::{Map, Value};

pub const COLORS: &str = "colors";
pub const TYPOGRAPHY: &str = "typography";
pub const SPACING: &str = "spacing";

/// Maximum number of entries kept per token collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCaps {
    pub max_colors: usize,
    pub max_typography: usize,
    pub max_spacing: usize,
}

impl TokenCaps {
    pub const STANDARD: Self = Self {
        max_colors: 30,
        max_typography: 20,
        max_spacing: 25,
    };

    pub const AGGRESSIVE: Self = Self {
        max_colors: 15,
        max_typography: 10,
        max_spacing: 10,
    };
}

/// Entries left in each collection after reduction. Collections that are
/// missing or not objects count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    pub colors: usize,
    pub typography: usize,
    pub spacing: usize,
}

/// Truncate the token collections to their caps.
///
/// Colors are ranked by `usage` first, highest first; ties keep their original
/// order. Typography and spacing keep their first entries as-is.
pub fn reduce_tokens(tokens: &mut Map<String, Value>, caps: &TokenCaps) -> TokenCounts {
    if let Some(colors) = tokens.get_mut(COLORS).and_then(Value::as_object_mut) {
        let mut ranked: Vec<(String, Value)> = std::mem::take(colors).into_iter().collect();
        // sort_by is stable
        ranked.sort_by(|(_, a), (_, b)| usage(b).total_cmp(&usage(a)));
        *colors = ranked.into_iter().take(caps.max_colors).collect();
    }

    if let Some(typography) = tokens.get_mut(TYPOGRAPHY).and_then(Value::as_object_mut) {
        keep_first(typography, caps.max_typography);
    }

    if let Some(spacing) = tokens.get_mut(SPACING).and_then(Value::as_object_mut) {
        keep_first(spacing, caps.max_spacing);
    }

    TokenCounts {
        colors: collection_len(tokens, COLORS),
        typography: collection_len(tokens, TYPOGRAPHY),
        spacing: collection_len(tokens, SPACING),
    }
}

/// Usage count of a color token, 0 for anything malformed.
fn usage(token: &Value) -> f64 {
    token
        .get("usage")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn keep_first(collection: &mut Map<String, Value>, n: usize) {
    if collection.len() > n {
        *collection = std::mem::take(collection).into_iter().take(n).collect();
    }
}

fn collection_len(tokens: &Map<String, Value>, key: &str) -> usize {
    tokens
        .get(key)
        .and_then(Value::as_object)
        .map_or(0, Map::len)
}
