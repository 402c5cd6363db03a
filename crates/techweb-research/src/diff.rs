//! "Newly available" diffing between two availability snapshots.
//!
//! The answer is a plain set difference over identity-sorted snapshots,
//! computed by one linear merge. It never walks the unlock graph, so it
//! cannot double count or recurse on cyclic `unlocks`.

use crate::context::ResearchContext;
use crate::resolver::Resolver;
use crate::state::ResolverState;
use std::cmp::Ordering;
use techweb_core::id::TopicId;

/// `after - before` for two identity-sorted, duplicate-free snapshots.
pub fn diff_newly_available(before: &[TopicId], after: &[TopicId]) -> Vec<TopicId> {
    debug_assert!(before.is_sorted(), "`before` snapshot must be sorted");
    debug_assert!(after.is_sorted(), "`after` snapshot must be sorted");

    let mut out = Vec::new();
    let mut b = before.iter().peekable();

    for &topic in after {
        loop {
            match b.peek().map(|&&prev| prev.cmp(&topic)) {
                Some(Ordering::Less) => {
                    b.next();
                }
                Some(Ordering::Equal) => {
                    b.next();
                    break;
                }
                Some(Ordering::Greater) | None => {
                    out.push(topic);
                    break;
                }
            }
        }
    }

    out
}

impl Resolver<'_> {
    /// Topics available now that were not in `before`.
    pub fn newly_available_since(
        &self,
        before: &[TopicId],
        state: &ResolverState,
        context: Option<&dyn ResearchContext>,
        consider_all_unlocked: bool,
    ) -> Vec<TopicId> {
        let after = self.available_projects(state, context, consider_all_unlocked);
        diff_newly_available(before, &after)
    }
}
