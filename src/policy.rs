//! Tiered compression policy.
//!
//! A document over the target size gets one tier pass (standard, or aggressive
//! when forced or very large), then a second aggressive pass if it is still
//! over the target.

use std::fmt;

use tracing::{info, warn};

use crate::assets::{PrunedAssets, prune_assets};
use crate::document::{Document, keys};
use crate::error::FigtrimError;
use crate::size::{bytes_to_mb, estimate_size_bytes};
use crate::tokens::{TokenCaps, TokenCounts, reduce_tokens};
use crate::tree::{TreeStats, simplify_tree};

/// Top-level keys dropped outright by the aggressive tier.
const AGGRESSIVE_DROPPED_KEYS: [&str; 3] = [
    keys::CSS_VARIABLES,
    keys::VARIANTS,
    keys::EXTRACTION_SUMMARY,
];

/// Compression tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Standard,
    Aggressive,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Standard => f.write_str("standard"),
            Tier::Aggressive => f.write_str("aggressive"),
        }
    }
}

/// Where the orchestrator is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uncompressed,
    Standard,
    Aggressive,
    Done,
}

impl From<Tier> for Stage {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Standard => Stage::Standard,
            Tier::Aggressive => Stage::Aggressive,
        }
    }
}

/// Limits applied by a single tier pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TierLimits {
    /// Images above this decoded size (KB) are removed
    pub image_max_kb: f64,
    /// SVGs above this size (KB) are removed
    pub svg_max_kb: f64,
    pub tokens: TokenCaps,
    /// Nodes at this depth lose their children
    pub max_depth: usize,
    /// Drop the screenshot, component definitions and optional top-level sections
    pub drop_optional_sections: bool,
}

impl TierLimits {
    pub fn standard() -> Self {
        Self {
            image_max_kb: 75.0,
            svg_max_kb: 30.0,
            tokens: TokenCaps::STANDARD,
            max_depth: 10,
            drop_optional_sections: false,
        }
    }

    pub fn aggressive() -> Self {
        Self {
            image_max_kb: 25.0,
            svg_max_kb: 10.0,
            tokens: TokenCaps::AGGRESSIVE,
            max_depth: 6,
            drop_optional_sections: true,
        }
    }
}

/// Compression policy.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Size budget in MB (default: 150)
    pub target_size_mb: f64,
    /// Go straight to the aggressive tier
    pub force_aggressive: bool,
    /// Inputs above this size (MB) skip the standard tier (default: 250)
    pub escalation_threshold_mb: f64,
    /// Outputs still above this size (MB) are flagged (default: 200)
    pub oversize_warning_mb: f64,
    pub standard: TierLimits,
    pub aggressive: TierLimits,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            target_size_mb: 150.0,
            force_aggressive: false,
            escalation_threshold_mb: 250.0,
            oversize_warning_mb: 200.0,
            standard: TierLimits::standard(),
            aggressive: TierLimits::aggressive(),
        }
    }
}

impl Policy {
    pub fn limits(&self, tier: Tier) -> &TierLimits {
        match tier {
            Tier::Standard => &self.standard,
            Tier::Aggressive => &self.aggressive,
        }
    }

    /// Tier for the first pass, or `None` if the document already fits.
    pub fn initial_tier(&self, size_mb: f64) -> Option<Tier> {
        if size_mb <= self.target_size_mb {
            None
        } else if self.force_aggressive || size_mb > self.escalation_threshold_mb {
            Some(Tier::Aggressive)
        } else {
            Some(Tier::Standard)
        }
    }
}

/// What one tier pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub tier: Tier,
    pub assets: PrunedAssets,
    /// `None` when the document has no `designTokens` object
    pub tokens: Option<TokenCounts>,
    /// `None` when the document has no `tree` object
    pub tree: Option<TreeStats>,
    /// Top-level sections removed or emptied, in the order they were handled
    pub dropped: Vec<&'static str>,
    pub size_after_bytes: usize,
}

/// Outcome of a [`compress`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub original_bytes: usize,
    pub passes: Vec<PassReport>,
    pub final_bytes: usize,
    /// Every stage visited, from `Uncompressed` to `Done`
    pub stages: Vec<Stage>,
    oversize_warning_mb: f64,
}

impl CompressionReport {
    pub fn original_mb(&self) -> f64 {
        bytes_to_mb(self.original_bytes)
    }

    pub fn final_mb(&self) -> f64 {
        bytes_to_mb(self.final_bytes)
    }

    pub fn was_compressed(&self) -> bool {
        !self.passes.is_empty()
    }

    /// Percentage of the original size that was removed.
    pub fn reduction_percent(&self) -> f64 {
        percent_saved(self.original_bytes, self.final_bytes)
    }

    /// True when the output is still far above any plugin's comfort zone.
    pub fn is_oversized(&self) -> bool {
        self.final_mb() > self.oversize_warning_mb
    }
}

/// The result of [`compress`]: the reduced document and what happened to it.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub document: Document,
    pub report: CompressionReport,
}

/// Shrink `doc` according to `policy`.
pub fn compress(mut doc: Document, policy: &Policy) -> Result<Compressed, FigtrimError> {
    let original_bytes = estimate_size_bytes(&doc)?;
    let original_mb = bytes_to_mb(original_bytes);
    let mut stages = vec![Stage::Uncompressed];
    let mut passes = Vec::new();

    info!(size_mb = %format!("{original_mb:.2}"), "original size");

    let mut final_bytes = original_bytes;
    match policy.initial_tier(original_mb) {
        None => {
            info!(target_mb = policy.target_size_mb, "already under target");
        }
        Some(tier) => {
            stages.push(tier.into());
            let first = apply_tier(&mut doc, tier, policy.limits(tier))?;
            final_bytes = first.size_after_bytes;
            let reduction = percent_saved(original_bytes, final_bytes);
            info!(
                size_mb = %format!("{:.2}", bytes_to_mb(final_bytes)),
                reduction = %format!("{reduction:.1}%"),
                "compressed size"
            );
            passes.push(first);

            if bytes_to_mb(final_bytes) > policy.target_size_mb {
                warn!(
                    target_mb = policy.target_size_mb,
                    "still over target, applying additional compression"
                );
                stages.push(Stage::Aggressive);
                let second = apply_tier(&mut doc, Tier::Aggressive, &policy.aggressive)?;
                final_bytes = second.size_after_bytes;
                info!(
                    size_mb = %format!("{:.2}", bytes_to_mb(final_bytes)),
                    "final size"
                );
                passes.push(second);
            }
        }
    }
    stages.push(Stage::Done);

    Ok(Compressed {
        document: doc,
        report: CompressionReport {
            original_bytes,
            passes,
            final_bytes,
            stages,
            oversize_warning_mb: policy.oversize_warning_mb,
        },
    })
}

/// Run every stage of one tier over the document and measure the result.
pub fn apply_tier(
    doc: &mut Document,
    tier: Tier,
    limits: &TierLimits,
) -> Result<PassReport, FigtrimError> {
    info!(%tier, "applying compression");

    let assets = match doc.object_mut(keys::ASSETS) {
        Some(assets) => {
            let pruned = prune_assets(assets, limits.image_max_kb, limits.svg_max_kb);
            info!(
                images = pruned.images,
                max_kb = limits.image_max_kb,
                "removed oversized images"
            );
            info!(
                svgs = pruned.svgs,
                max_kb = limits.svg_max_kb,
                "removed oversized svgs"
            );
            pruned
        }
        None => PrunedAssets::default(),
    };

    let tokens = doc.object_mut(keys::DESIGN_TOKENS).map(|tokens| {
        let counts = reduce_tokens(tokens, &limits.tokens);
        info!(
            colors = counts.colors,
            typography = counts.typography,
            spacing = counts.spacing,
            "compressed design tokens"
        );
        counts
    });

    let mut dropped = Vec::new();
    if limits.drop_optional_sections {
        if doc.remove(keys::SCREENSHOT).is_some() {
            info!("removed screenshot");
            dropped.push(keys::SCREENSHOT);
        }
        if doc.clear_component_definitions() {
            info!("removed component definitions");
            dropped.push(keys::COMPONENTS);
        }
    }

    let tree = doc.object_mut(keys::TREE).map(|root| {
        let stats = simplify_tree(root, limits.max_depth);
        info!(
            nodes = stats.nodes_visited,
            metadata_removed = stats.metadata_removed,
            truncated = stats.truncated,
            max_depth = limits.max_depth,
            "simplified tree"
        );
        stats
    });

    if limits.drop_optional_sections {
        for key in AGGRESSIVE_DROPPED_KEYS {
            if doc.remove(key).is_some() {
                info!(key, "removed section");
                dropped.push(key);
            }
        }
    }

    Ok(PassReport {
        tier,
        assets,
        tokens,
        tree,
        dropped,
        size_after_bytes: estimate_size_bytes(doc)?,
    })
}

fn percent_saved(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        (before.saturating_sub(after) as f64 / before as f64) * 100.0
    }
}
