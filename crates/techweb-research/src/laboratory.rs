//! End-of-project flow: what happens when a site finishes researching a topic.
//!
//! A finished project completes three independent cascade entry points in
//! order: the topic itself, its lookup alias, and the bonus topic drawn
//! from its "get one free" pools. All three share score and notification
//! semantics, and the report diffs availability across the whole flow.

use crate::context::{ResearchContext, ResearchSite, ScoreLedger};
use crate::diff::diff_newly_available;
use crate::resolver::Resolver;
use crate::settings::ResearchSettings;
use crate::state::{ResearchEvent, ResolverState};
use techweb_core::catalog::UnlockableKind;
use techweb_core::id::{TopicId, UnlockableId};
use techweb_core::rng::SimRng;

/// Errors from name-based laboratory entry points.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}

/// Everything a finished project changed, for the notification UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub topic: TopicId,
    /// `false` when the topic was disabled and nothing happened.
    pub applied: bool,
    pub lookup: Option<TopicId>,
    pub bonus: Option<TopicId>,
    /// Topics that became available, in identity order.
    pub newly_available: Vec<TopicId>,
    /// Derived content opened by the topic, its lookup or its bonus.
    pub unlockables: Vec<(UnlockableKind, UnlockableId)>,
    /// Score awarded across all three completions.
    pub score: i64,
}

impl CompletionReport {
    fn new(topic: TopicId) -> Self {
        Self {
            topic,
            applied: false,
            lookup: None,
            bonus: None,
            newly_available: Vec::new(),
            unlockables: Vec::new(),
            score: 0,
        }
    }
}

/// Tracks the score a single flow awards while forwarding it to the caller's ledger.
struct Tally<'l> {
    inner: &'l mut dyn ScoreLedger,
    total: i64,
}

impl ScoreLedger for Tally<'_> {
    fn add_score(&mut self, delta: i64) {
        self.total = self.total.saturating_add(delta);
        self.inner.add_score(delta);
    }
}

/// Drives the end-of-project flow with configured settings and its own RNG.
#[derive(Debug, Clone)]
pub struct Laboratory {
    settings: ResearchSettings,
    rng: SimRng,
}

impl Laboratory {
    pub fn new(settings: ResearchSettings) -> Self {
        let rng = SimRng::new(settings.rng_seed);
        Self { settings, rng }
    }

    pub fn settings(&self) -> &ResearchSettings {
        &self.settings
    }

    /// RNG state, for saving alongside the research state.
    pub fn rng(&self) -> &SimRng {
        &self.rng
    }

    pub fn restore_rng(&mut self, rng: SimRng) {
        self.rng = rng;
    }

    /// Finish `topic` at `site`.
    pub fn finish<S: ResearchSite>(
        &mut self,
        resolver: &Resolver,
        state: &mut ResolverState,
        site: &mut S,
        ledger: &mut dyn ScoreLedger,
        topic: TopicId,
    ) -> CompletionReport {
        let mut report = CompletionReport::new(topic);
        let Some(rules) = resolver.catalog().topic(topic) else {
            tracing::warn!(target: "techweb::laboratory", topic = topic.0, "laboratory.unknown_topic");
            return report;
        };
        let all_unlocked = self.settings.consider_all_unlocked;
        let award = self.settings.award_score;

        // A disabled topic leaves the site and its stock untouched.
        if state.is_disabled(topic) {
            tracing::debug!(target: "techweb::laboratory", topic = %rules.name, "laboratory.disabled_topic");
            return report;
        }

        let before = resolver.available_projects(state, Some(&*site), all_unlocked);

        site.stop_project(topic);
        if rules.destroys_item && !site.consume_item(topic) {
            tracing::debug!(target: "techweb::laboratory", topic = %rules.name, "laboratory.no_item_to_destroy");
        }

        // Drawn before the primary completion so the pool is judged on the
        // pre-completion state.
        let bonus = resolver.select_bonus(state, topic, &mut self.rng);

        let mut tally = Tally {
            inner: ledger,
            total: 0,
        };

        let primary = resolver.complete_research(state, topic, award, Some(&*site), &mut tally);
        report.applied = primary.is_applied();
        if !report.applied {
            return report;
        }

        if let Some(lookup) = rules.lookup {
            let completion = resolver.complete_research(state, lookup, award, Some(&*site), &mut tally);
            if completion.is_applied() {
                report.lookup = Some(lookup);
            }
        }

        if let Some(bonus) = bonus {
            let completion = resolver.complete_research(state, bonus, award, Some(&*site), &mut tally);
            if completion.is_applied() {
                state.push_event(ResearchEvent::BonusGranted {
                    source: topic,
                    bonus,
                });
                report.bonus = Some(bonus);
                // The bonus topic files under its own alias too.
                if let Some(alias) = resolver.catalog().topic(bonus).and_then(|t| t.lookup) {
                    resolver.complete_research(state, alias, award, Some(&*site), &mut tally);
                }
            }
        }

        let after = resolver.available_projects(state, Some(&*site), all_unlocked);
        report.newly_available = diff_newly_available(&before, &after);

        for source in [Some(topic), report.lookup, report.bonus].into_iter().flatten() {
            for kind in UnlockableKind::ALL {
                for unlockable in resolver.dependable_unlockables(state, source, kind) {
                    if !report.unlockables.contains(&(kind, unlockable)) {
                        report.unlockables.push((kind, unlockable));
                    }
                }
            }
        }

        report.score = tally.total;
        tracing::info!(
            target: "techweb::laboratory",
            topic = %rules.name,
            score = report.score,
            newly_available = report.newly_available.len(),
            bonus = ?report.bonus.and_then(|b| resolver.catalog().name(b)),
            "laboratory.finished"
        );
        report
    }

    /// Finish a topic given by name.
    pub fn finish_named<S: ResearchSite>(
        &mut self,
        resolver: &Resolver,
        state: &mut ResolverState,
        site: &mut S,
        ledger: &mut dyn ScoreLedger,
        name: &str,
    ) -> Result<CompletionReport, StateError> {
        let topic = resolver
            .catalog()
            .topic_id(name)
            .ok_or_else(|| StateError::UnknownTopic(name.to_string()))?;
        Ok(self.finish(resolver, state, site, ledger, topic))
    }
}

/// Availability snapshot usable without a mutable site.
pub fn snapshot(
    resolver: &Resolver,
    state: &ResolverState,
    site: &dyn ResearchContext,
    settings: &ResearchSettings,
) -> Vec<TopicId> {
    resolver.available_projects(state, Some(site), settings.consider_all_unlocked)
}
