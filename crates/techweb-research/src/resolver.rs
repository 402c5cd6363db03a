//! The research resolver: which topics are startable, what a completion
//! cascades into, and which bonus topic a completion grants.
//!
//! # Cascade
//!
//! [`Resolver::complete_research`] walks an explicit FIFO worklist seeded
//! with the completed topic. Each topic is enqueued at most once per call,
//! checked against the whole worklist history, so diamond-shaped and cyclic
//! unlock graphs terminate without double scoring. After each newly
//! discovered topic, every zero-cost topic that is now available joins the
//! worklist if it is unprotected, or if the topic just processed lists it
//! in `unlocks`.
//!
//! An already-discovered topic only re-opens its cascade while it still has
//! an unclaimed protected unlock; its plain checkpoints were enqueued the
//! first time it completed.

use crate::context::{ResearchContext, ScoreLedger};
use crate::state::{ResearchEvent, ResolverState, TopicStatus};
use std::collections::{BTreeSet, HashSet};
use techweb_core::catalog::{Catalog, Topic};
use techweb_core::id::TopicId;
use techweb_core::rng::SimRng;

/// What a completion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The topic is permanently disabled; nothing changed.
    Disabled,
    /// The topic id does not resolve in the catalog; nothing changed.
    Unknown,
    /// The cascade ran.
    Applied(Cascade),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }

    /// The cascade, if one ran.
    pub fn cascade(&self) -> Option<&Cascade> {
        match self {
            Completion::Applied(cascade) => Some(cascade),
            _ => None,
        }
    }
}

/// Topics touched by one cascade, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    /// Newly discovered topics.
    pub discovered: Vec<TopicId>,
    /// Topics hit by a `disables` edge.
    pub disabled: Vec<TopicId>,
    /// Topics released from `Disabled`.
    pub reenabled: Vec<TopicId>,
    /// Score awarded by this cascade.
    pub score: i64,
}

/// Stateless resolver over a read-only catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Catalog lookup that logs dangling ids instead of failing.
    pub(crate) fn topic(&self, id: TopicId) -> Option<&'a Topic> {
        let topic = self.catalog.topic(id);
        if topic.is_none() {
            tracing::warn!(target: "techweb::resolver", topic = id.0, "resolver.unknown_topic");
        }
        topic
    }

    /// Whether every id resolves and is discovered. A dangling id counts
    /// as unsatisfied.
    pub(crate) fn satisfied(&self, state: &ResolverState, topics: &[TopicId]) -> bool {
        state.all_discovered(topics) && topics.iter().all(|&t| self.topic(t).is_some())
    }

    // -- Availability --

    /// One-hop `unlocks` targets of every discovered topic.
    pub fn unlocked_by_discovered(&self, state: &ResolverState) -> BTreeSet<TopicId> {
        state
            .discovered()
            .filter_map(|id| self.topic(id))
            .flat_map(|t| t.unlocks.iter().copied())
            .collect()
    }

    /// Topics a player could start right now, in identity order.
    ///
    /// Without a context, site checks (in-progress, item, functions) are
    /// skipped. `consider_all_unlocked` bypasses `dependencies` for every
    /// topic; `requirements` still apply.
    pub fn available_projects(
        &self,
        state: &ResolverState,
        context: Option<&dyn ResearchContext>,
        consider_all_unlocked: bool,
    ) -> Vec<TopicId> {
        let unlocked = self.unlocked_by_discovered(state);

        self.catalog
            .topics()
            .filter(|topic| {
                self.is_available(state, context, topic, &unlocked, consider_all_unlocked)
            })
            .map(|topic| topic.id)
            .collect()
    }

    /// [`Self::available_projects`] without checkpoints: the list a player
    /// actually picks from. Zero-cost topics only ever complete through a
    /// cascade.
    pub fn startable_projects(
        &self,
        state: &ResolverState,
        context: Option<&dyn ResearchContext>,
        consider_all_unlocked: bool,
    ) -> Vec<TopicId> {
        self.available_projects(state, context, consider_all_unlocked)
            .into_iter()
            .filter(|&id| self.catalog.topic(id).is_some_and(|t| !t.is_checkpoint()))
            .collect()
    }

    fn is_available(
        &self,
        state: &ResolverState,
        context: Option<&dyn ResearchContext>,
        topic: &Topic,
        unlocked: &BTreeSet<TopicId>,
        consider_all_unlocked: bool,
    ) -> bool {
        if state.is_disabled(topic.id) {
            return false;
        }

        let skip_dependencies = consider_all_unlocked || unlocked.contains(&topic.id);
        if !skip_dependencies && !self.satisfied(state, &topic.dependencies) {
            return false;
        }

        if !self.satisfied(state, &topic.requirements) {
            return false;
        }

        if state.is_discovered(topic.id)
            && !self.bonus_value(state, topic)
            && !self.protected_unlock_value(state, topic)
        {
            return false;
        }

        if let Some(ctx) = context {
            if ctx.is_in_progress(topic.id) {
                return false;
            }
            if topic.needs_item && !ctx.has_item(topic.id) {
                return false;
            }
            if !ctx.capabilities().covers(topic.required_functions) {
                return false;
            }
        }

        true
    }

    // -- Visibility predicates --

    /// Whether completing `topic` again could still grant a bonus topic.
    pub fn has_remaining_bonus_value(&self, state: &ResolverState, topic: TopicId) -> bool {
        self.topic(topic)
            .is_some_and(|t| self.bonus_value(state, t))
    }

    /// Whether `topic` still has a protected unlock nobody has claimed.
    pub fn has_remaining_protected_unlock_value(
        &self,
        state: &ResolverState,
        topic: TopicId,
    ) -> bool {
        self.topic(topic)
            .is_some_and(|t| self.protected_unlock_value(state, t))
    }

    fn bonus_value(&self, state: &ResolverState, topic: &Topic) -> bool {
        let open = |id: &TopicId| !state.is_disabled(*id) && !state.is_discovered(*id);

        topic.bonus_pool.iter().any(open)
            || topic
                .protected_bonus
                .iter()
                .filter(|(key, _)| state.is_discovered(*key))
                .any(|(_, pool)| pool.iter().any(open))
    }

    fn protected_unlock_value(&self, state: &ResolverState, topic: &Topic) -> bool {
        topic.unlocks.iter().any(|&id| {
            !state.is_disabled(id)
                && !state.is_discovered(id)
                && self.catalog.topic(id).is_some_and(Topic::is_protected)
        })
    }

    // -- Bonus --

    /// Every topic the bonus draw for `topic` could currently yield: the
    /// open part of `bonus_pool`, then the open part of each protected pool
    /// whose key is discovered, in declaration order.
    pub fn bonus_candidates(&self, state: &ResolverState, topic: TopicId) -> Vec<TopicId> {
        let Some(topic) = self.topic(topic) else {
            return Vec::new();
        };
        let open = |id: &&TopicId| !state.is_disabled(**id) && !state.is_discovered(**id);

        let protected = topic
            .protected_bonus
            .iter()
            .filter(|(key, _)| state.is_discovered(*key))
            .flat_map(|(_, pool)| pool.iter());

        topic
            .bonus_pool
            .iter()
            .chain(protected)
            .filter(open)
            .copied()
            .collect()
    }

    /// Pick the "get one free" topic for `topic`, if any remains.
    ///
    /// Does not mutate state; feed the result to [`Self::complete_research`].
    pub fn select_bonus(
        &self,
        state: &ResolverState,
        topic: TopicId,
        rng: &mut SimRng,
    ) -> Option<TopicId> {
        let candidates = self.bonus_candidates(state, topic);
        if candidates.is_empty() {
            return None;
        }
        let sequential = self.catalog.topic(topic).is_some_and(|t| t.sequential_bonus);
        if sequential {
            candidates.first().copied()
        } else {
            rng.choose(&candidates).copied()
        }
    }

    // -- Completion --

    /// Complete `topic` and run the cascade it triggers.
    ///
    /// Safe to call repeatedly with the same topic: score is only awarded
    /// on first discovery, and each topic is processed at most once per call.
    pub fn complete_research(
        &self,
        state: &mut ResolverState,
        topic: TopicId,
        award_score: bool,
        context: Option<&dyn ResearchContext>,
        ledger: &mut dyn ScoreLedger,
    ) -> Completion {
        let Some(root) = self.topic(topic) else {
            return Completion::Unknown;
        };
        if state.is_disabled(topic) {
            tracing::debug!(target: "techweb::resolver", topic = %root.name, "resolver.completion_disabled");
            return Completion::Disabled;
        }

        let mut cascade = Cascade::default();

        for &target in &root.reenables {
            if state.is_disabled(target) {
                state.set_status(target, TopicStatus::New);
                state.push_event(ResearchEvent::TopicReenabled { topic: target });
                cascade.reenabled.push(target);
            }
        }

        let mut worklist: Vec<TopicId> = vec![topic];
        let mut enqueued: HashSet<TopicId> = HashSet::from([topic]);
        let mut cursor = 0;

        while let Some(&item_id) = worklist.get(cursor) {
            cursor += 1;

            let Some(item) = self.topic(item_id) else {
                continue;
            };
            // A disables edge earlier in this cascade may have locked it.
            if item_id != topic && state.is_disabled(item_id) {
                continue;
            }

            // Both predicates must see the Discovery Set before insertion.
            let protected_pending = self.protected_unlock_value(state, item);
            let bonus_pending = self.bonus_value(state, item);

            let continue_cascade = if !state.is_discovered(item_id) {
                state.insert_discovered(item_id);
                if !bonus_pending && !protected_pending {
                    state.forget_shown(item_id);
                }

                let points = if award_score { item.points } else { 0 };
                if award_score {
                    ledger.add_score(item.points);
                    cascade.score = cascade.score.saturating_add(item.points);
                }
                state.push_event(ResearchEvent::TopicDiscovered {
                    topic: item_id,
                    points,
                });
                cascade.discovered.push(item_id);
                tracing::debug!(target: "techweb::resolver", topic = %item.name, points, "resolver.discovered");

                for &target in &item.disables {
                    state.remove_discovered(target);
                    state.set_status(target, TopicStatus::Disabled);
                    state.push_event(ResearchEvent::TopicDisabled { topic: target });
                    cascade.disabled.push(target);
                }
                true
            } else {
                protected_pending
            };

            if !continue_cascade {
                continue;
            }

            for candidate in self.available_projects(state, context, false) {
                if enqueued.contains(&candidate) {
                    continue;
                }
                let Some(next) = self.catalog.topic(candidate) else {
                    continue;
                };
                if !next.is_checkpoint() {
                    continue;
                }
                if !next.is_protected() || item.unlocks.contains(&candidate) {
                    enqueued.insert(candidate);
                    worklist.push(candidate);
                }
            }
        }

        Completion::Applied(cascade)
    }
}
