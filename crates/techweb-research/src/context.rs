//! Collaborator contracts: the site a project runs at, and the score ledger.

use std::collections::{BTreeSet, HashMap};
use techweb_core::capability::Capabilities;
use techweb_core::id::TopicId;

/// Read-only view of a site, answered per call during resolution.
///
/// Implementations are expected to be cheap in-memory lookups.
pub trait ResearchContext {
    /// Whether the site holds at least one of the item matching `topic`.
    fn has_item(&self, topic: TopicId) -> bool;

    /// Whether `topic` is currently being researched here.
    fn is_in_progress(&self, topic: TopicId) -> bool;

    /// Functions the site provides.
    fn capabilities(&self) -> Capabilities;
}

/// A site the end-of-project flow may mutate.
pub trait ResearchSite: ResearchContext {
    /// Remove one item matching `topic`. Returns `false` if none was held.
    fn consume_item(&mut self, topic: TopicId) -> bool;

    /// Stop researching `topic` here (it finished).
    fn stop_project(&mut self, topic: TopicId);
}

/// Receives score deltas.
pub trait ScoreLedger {
    fn add_score(&mut self, delta: i64);
}

impl ScoreLedger for i64 {
    fn add_score(&mut self, delta: i64) {
        *self = self.saturating_add(delta);
    }
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// In-memory site: item stock keyed by topic, running projects, capabilities.
#[derive(Debug, Clone, Default)]
pub struct Site {
    pub name: String,
    items: HashMap<TopicId, u32>,
    in_progress: BTreeSet<TopicId>,
    capabilities: Capabilities,
}

impl Site {
    pub fn new(name: &str, capabilities: Capabilities) -> Self {
        Self {
            name: name.to_string(),
            capabilities,
            ..Self::default()
        }
    }

    pub fn add_item(&mut self, topic: TopicId, count: u32) {
        *self.items.entry(topic).or_insert(0) += count;
    }

    pub fn item_count(&self, topic: TopicId) -> u32 {
        self.items.get(&topic).copied().unwrap_or(0)
    }

    pub fn start_project(&mut self, topic: TopicId) {
        self.in_progress.insert(topic);
    }

    pub fn projects(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.in_progress.iter().copied()
    }

    pub fn grant(&mut self, capabilities: Capabilities) {
        self.capabilities |= capabilities;
    }
}

impl ResearchContext for Site {
    fn has_item(&self, topic: TopicId) -> bool {
        self.item_count(topic) > 0
    }

    fn is_in_progress(&self, topic: TopicId) -> bool {
        self.in_progress.contains(&topic)
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

impl ResearchSite for Site {
    fn consume_item(&mut self, topic: TopicId) -> bool {
        match self.items.get_mut(&topic) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.items.remove(&topic);
                }
                true
            }
            _ => false,
        }
    }

    fn stop_project(&mut self, topic: TopicId) {
        self.in_progress.remove(&topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_stock_and_consumption() {
        let mut site = Site::new("Cydonia Watch", Capabilities::empty());
        assert!(!site.has_item(TopicId(0)));
        site.add_item(TopicId(0), 2);
        assert!(site.has_item(TopicId(0)));
        assert!(site.consume_item(TopicId(0)));
        assert!(site.consume_item(TopicId(0)));
        assert!(!site.consume_item(TopicId(0)));
        assert_eq!(site.item_count(TopicId(0)), 0);
    }

    #[test]
    fn projects_start_and_stop() {
        let mut site = Site::new("North Base", Capabilities::empty());
        site.start_project(TopicId(4));
        assert!(site.is_in_progress(TopicId(4)));
        site.stop_project(TopicId(4));
        assert!(!site.is_in_progress(TopicId(4)));
    }

    #[test]
    fn grant_adds_capabilities() {
        let mut site = Site::new("Lab", Capabilities::bit(0));
        site.grant(Capabilities::bit(5));
        assert!(site.capabilities().covers(Capabilities::bit(0) | Capabilities::bit(5)));
    }

    #[test]
    fn integer_ledger_accumulates() {
        let mut score = 0i64;
        score.add_score(15);
        score.add_score(-5);
        assert_eq!(score, 10);
    }
}
