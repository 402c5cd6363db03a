use serde::{Deserialize, Serialize};

/// Tunables for the end-of-project flow. Loaded from an optional
/// `settings` data file; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    /// Seed for non-sequential bonus draws.
    pub rng_seed: u64,
    /// Award topic points for completions (primary, lookup and bonus).
    pub award_score: bool,
    /// Debug switch: availability snapshots ignore `dependencies`.
    pub consider_all_unlocked: bool,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            rng_seed: 0,
            award_score: true,
            consider_all_unlocked: false,
        }
    }
}
