//! Derived content made available by research: manufacture projects,
//! purchasable items and facilities gated on discovered topics.

use crate::resolver::Resolver;
use crate::state::ResolverState;
use techweb_core::catalog::UnlockableKind;
use techweb_core::id::{TopicId, UnlockableId};

impl Resolver<'_> {
    /// Every unlockable of `kind` whose required topics are all discovered.
    pub fn available_unlockables(
        &self,
        state: &ResolverState,
        kind: UnlockableKind,
    ) -> Vec<UnlockableId> {
        self.catalog()
            .unlockables()
            .filter(|u| u.kind == kind && self.satisfied(state, &u.requires))
            .map(|u| u.id)
            .collect()
    }

    /// Unlockables of `kind` that list `topic` as a requirement and are now
    /// fully satisfied: what discovering `topic` just opened up.
    pub fn dependable_unlockables(
        &self,
        state: &ResolverState,
        topic: TopicId,
        kind: UnlockableKind,
    ) -> Vec<UnlockableId> {
        if !state.is_discovered(topic) {
            return Vec::new();
        }
        self.catalog()
            .unlockables()
            .filter(|u| {
                u.kind == kind && u.requires.contains(&topic) && self.satisfied(state, &u.requires)
            })
            .map(|u| u.id)
            .collect()
    }
}
