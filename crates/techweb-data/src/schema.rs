//! Serde data file structs for research content.
//!
//! Every cross-reference is a topic name. The loader turns these into
//! [`TopicDraft`]s and [`UnlockableDraft`]s and lets the catalog builder
//! resolve them.

use serde::Deserialize;
use techweb_core::catalog::{TopicDraft, UnlockableDraft, UnlockableKind};

// ===========================================================================
// Topics
// ===========================================================================

/// A research topic definition in a data file.
///
/// Only `name` is mandatory. A topic with no `cost` is a checkpoint that
/// completes for free when something unlocks it.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicData {
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub unlocks: Vec<String>,
    #[serde(default)]
    pub disables: Vec<String>,
    #[serde(default)]
    pub reenables: Vec<String>,
    #[serde(default)]
    pub bonus_pool: Vec<String>,
    #[serde(default)]
    pub protected_bonus: Vec<ProtectedBonusData>,
    #[serde(default)]
    pub sequential_bonus: bool,
    #[serde(default)]
    pub needs_item: bool,
    #[serde(default)]
    pub destroys_item: bool,
    #[serde(default)]
    pub required_functions: Vec<String>,
    #[serde(default)]
    pub lookup: Option<String>,
}

/// A bonus pool that only opens once `after` is discovered.
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedBonusData {
    pub after: String,
    pub pool: Vec<String>,
}

impl From<TopicData> for TopicDraft {
    fn from(data: TopicData) -> Self {
        TopicDraft {
            name: data.name,
            cost: data.cost,
            points: data.points,
            dependencies: data.dependencies,
            requirements: data.requirements,
            unlocks: data.unlocks,
            disables: data.disables,
            reenables: data.reenables,
            bonus_pool: data.bonus_pool,
            protected_bonus: data
                .protected_bonus
                .into_iter()
                .map(|p| (p.after, p.pool))
                .collect(),
            sequential_bonus: data.sequential_bonus,
            needs_item: data.needs_item,
            destroys_item: data.destroys_item,
            required_functions: data.required_functions,
            lookup: data.lookup,
        }
    }
}

// ===========================================================================
// Unlockables
// ===========================================================================

/// A manufacture project, purchasable item or facility gated on research.
#[derive(Debug, Clone, Deserialize)]
pub struct UnlockableData {
    pub name: String,
    pub kind: UnlockableKind,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl From<UnlockableData> for UnlockableDraft {
    fn from(data: UnlockableData) -> Self {
        UnlockableDraft {
            name: data.name,
            kind: data.kind,
            requires: data.requires,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
