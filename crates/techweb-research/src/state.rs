//! Mutable research state: the Discovery Set, the Status Table, the shown
//! set consulted by notification UIs, and the event buffer.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use techweb_core::id::TopicId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle flag of a topic, independent of whether it is discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicStatus {
    /// Not yet acknowledged by the player. Also the state after a re-enable.
    #[default]
    New,
    /// Acknowledged by the player.
    Normal,
    /// Permanently locked until an explicit re-enable.
    Disabled,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by research resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchEvent {
    /// A topic entered the Discovery Set. `points` is the score awarded (0
    /// when the completion did not award score).
    TopicDiscovered { topic: TopicId, points: i64 },

    /// A topic was removed from the Discovery Set (if present) and locked.
    TopicDisabled { topic: TopicId },

    /// A locked topic was released back to `New`.
    TopicReenabled { topic: TopicId },

    /// A bonus topic was granted for completing `source`.
    BonusGranted { source: TopicId, bonus: TopicId },
}

// ---------------------------------------------------------------------------
// ResolverState
// ---------------------------------------------------------------------------

/// Everything the resolver reads and writes between calls.
///
/// The resolver itself is stateless; every entry point takes this value
/// explicitly. One `complete_research` call must finish before the next
/// begins, so in a concurrent host the whole state sits behind one lock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverState {
    /// Discovered topics, ordered by identity, each present at most once.
    discovered: BTreeSet<TopicId>,

    /// Sparse status table. A missing entry means `New`.
    statuses: BTreeMap<TopicId, TopicStatus>,

    /// Topics already announced to the player.
    shown: BTreeSet<TopicId>,

    /// Events emitted since last drain. Not serialized (transient).
    #[serde(skip)]
    events: Vec<ResearchEvent>,
}

impl ResolverState {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Discovery Set --

    pub fn is_discovered(&self, topic: TopicId) -> bool {
        self.discovered.contains(&topic)
    }

    /// Whether every topic in `topics` is discovered. Vacuously true for an
    /// empty list.
    pub fn all_discovered(&self, topics: &[TopicId]) -> bool {
        topics.iter().all(|t| self.discovered.contains(t))
    }

    /// Discovered topics in identity order.
    pub fn discovered(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.discovered.iter().copied()
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Returns `true` if the topic was newly inserted.
    pub(crate) fn insert_discovered(&mut self, topic: TopicId) -> bool {
        self.discovered.insert(topic)
    }

    pub(crate) fn remove_discovered(&mut self, topic: TopicId) -> bool {
        self.discovered.remove(&topic)
    }

    // -- Status Table --

    pub fn status(&self, topic: TopicId) -> TopicStatus {
        self.statuses.get(&topic).copied().unwrap_or_default()
    }

    pub fn is_disabled(&self, topic: TopicId) -> bool {
        self.status(topic) == TopicStatus::Disabled
    }

    /// Non-`New` entries in identity order.
    pub fn statuses(&self) -> impl Iterator<Item = (TopicId, TopicStatus)> + '_ {
        self.statuses.iter().map(|(&t, &s)| (t, s))
    }

    pub(crate) fn set_status(&mut self, topic: TopicId, status: TopicStatus) {
        if status == TopicStatus::New {
            self.statuses.remove(&topic);
        } else {
            self.statuses.insert(topic, status);
        }
    }

    /// Record that the player has looked at a topic: `New` becomes `Normal`.
    /// A disabled topic stays disabled.
    pub fn acknowledge(&mut self, topic: TopicId) {
        if self.status(topic) == TopicStatus::New {
            self.set_status(topic, TopicStatus::Normal);
        }
    }

    // -- Shown set --

    /// Remember that `topic` has been announced to the player.
    pub fn mark_shown(&mut self, topic: TopicId) {
        self.shown.insert(topic);
    }

    pub fn was_shown(&self, topic: TopicId) -> bool {
        self.shown.contains(&topic)
    }

    /// Announced topics in identity order.
    pub fn shown(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.shown.iter().copied()
    }

    pub(crate) fn forget_shown(&mut self, topic: TopicId) {
        self.shown.remove(&topic);
    }

    // -- Event API --

    /// Drain all pending events. Returns events and clears the internal list.
    pub fn drain_events(&mut self) -> Vec<ResearchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a read-only view of pending events.
    pub fn pending_events(&self) -> &[ResearchEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: ResearchEvent) {
        self.events.push(event);
    }
}
