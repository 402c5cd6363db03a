//! Name-keyed snapshot of the research state for save games.
//!
//! Numeric [`TopicId`]s depend on catalog declaration order, which changes
//! whenever content is added, so saves store topic names instead.

use crate::state::{ResolverState, TopicStatus};
use serde::{Deserialize, Serialize};
use techweb_core::catalog::Catalog;
use techweb_core::id::TopicId;

/// What a save game must round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedResearch {
    /// Discovered topic names. Order is irrelevant; re-sorted on load.
    #[serde(default)]
    pub discovered: Vec<String>,
    /// Non-`New` statuses only.
    #[serde(default)]
    pub statuses: Vec<(String, TopicStatus)>,
    /// Topics already announced to the player.
    #[serde(default)]
    pub shown: Vec<String>,
}

impl ResolverState {
    /// Capture the persistent part of the state. Events are not saved.
    pub fn to_saved(&self, catalog: &Catalog) -> SavedResearch {
        let name = |id: TopicId| catalog.name(id).map(str::to_string);
        SavedResearch {
            discovered: self.discovered().filter_map(name).collect(),
            statuses: self
                .statuses()
                .filter_map(|(id, status)| name(id).map(|n| (n, status)))
                .collect(),
            shown: self.shown().filter_map(name).collect(),
        }
    }

    /// Rebuild state from a save. Names that no longer resolve (content
    /// removed since the save was written) are skipped with a warning.
    pub fn from_saved(catalog: &Catalog, saved: &SavedResearch) -> ResolverState {
        let resolve = |name: &str| {
            let id = catalog.topic_id(name);
            if id.is_none() {
                tracing::warn!(target: "techweb::persist", topic = name, "persist.unknown_topic");
            }
            id
        };

        let mut state = ResolverState::new();
        for id in saved.discovered.iter().filter_map(|n| resolve(n)) {
            state.insert_discovered(id);
        }
        for (name, status) in &saved.statuses {
            if let Some(id) = resolve(name) {
                state.set_status(id, *status);
            }
        }
        for id in saved.shown.iter().filter_map(|n| resolve(n)) {
            state.mark_shown(id);
        }
        state
    }
}
