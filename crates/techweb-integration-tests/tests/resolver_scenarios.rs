//! Cross-crate resolver scenarios.
//!
//! Each test drives the public resolver API end to end on a small
//! hand-built catalog: availability, the completion cascade, disable and
//! reenable edges, protected topics and bonus pools.

use techweb_core::catalog::TopicDraft;
use techweb_core::id::TopicId;
use techweb_core::test_utils::*;
use techweb_research::{Completion, Resolver, ResolverState, TopicStatus};

fn discovered(state: &ResolverState) -> Vec<TopicId> {
    state.discovered().collect()
}

// ===========================================================================
// Sample scenario
// ===========================================================================

#[test]
fn shared_checkpoint_scenario() {
    let catalog = checkpoint_catalog();
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;

    assert_eq!(
        resolver.startable_projects(&state, None, false),
        ids(&catalog, &["a", "b"])
    );

    resolver.complete_research(&mut state, id(&catalog, "a"), true, None, &mut score);

    assert_eq!(discovered(&state), ids(&catalog, &["a", "f"]));
    let available = resolver.available_projects(&state, None, false);
    for topic in ids(&catalog, &["b", "g"]) {
        assert!(available.contains(&topic), "{:?}", names(&catalog, &available));
    }
    assert_eq!(score, 13);
}

// ===========================================================================
// Idempotence and scoring
// ===========================================================================

#[test]
fn re_completion_is_idempotent() {
    let catalog = checkpoint_catalog();
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;
    let a = id(&catalog, "a");

    resolver.complete_research(&mut state, a, true, None, &mut score);
    let after_first = discovered(&state);
    let score_first = score;

    let second = resolver.complete_research(&mut state, a, true, None, &mut score);
    assert_eq!(discovered(&state), after_first);
    assert_eq!(score, score_first);
    assert!(second.cascade().is_some_and(|c| c.discovered.is_empty()));
}

#[test]
fn diamond_checkpoint_scored_once_in_either_order() {
    for order in [["left", "right"], ["right", "left"]] {
        let catalog = catalog([
            TopicDraft::new("left", 5).points(1).unlocks(&["join"]),
            TopicDraft::new("right", 5).points(1).unlocks(&["join"]),
            TopicDraft::new("join", 0).points(100),
        ]);
        let resolver = Resolver::new(&catalog);
        let mut state = ResolverState::new();
        let mut score = 0i64;

        for name in order {
            resolver.complete_research(&mut state, id(&catalog, name), true, None, &mut score);
        }
        assert_eq!(score, 102, "order {order:?}");
    }
}

// ===========================================================================
// Disable / reenable
// ===========================================================================

#[test]
fn disable_reenable_round_trip() {
    let catalog = catalog([
        TopicDraft::new("x", 5).points(4),
        TopicDraft::new("y", 5).disables(&["x"]),
        TopicDraft::new("z", 5).reenables(&["x"]),
    ]);
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;
    let x = id(&catalog, "x");

    resolver.complete_research(&mut state, x, true, None, &mut score);
    resolver.complete_research(&mut state, id(&catalog, "y"), true, None, &mut score);
    assert!(!state.is_discovered(x));
    assert_eq!(state.status(x), TopicStatus::Disabled);
    assert_eq!(
        resolver.complete_research(&mut state, x, true, None, &mut score),
        Completion::Disabled
    );

    resolver.complete_research(&mut state, id(&catalog, "z"), true, None, &mut score);
    assert_eq!(state.status(x), TopicStatus::New);
    assert!(!state.is_discovered(x));

    resolver.complete_research(&mut state, x, true, None, &mut score);
    assert!(state.is_discovered(x));
    assert_eq!(score, 8);
}

// ===========================================================================
// Protected topics
// ===========================================================================

#[test]
fn protected_topic_waits_for_its_requirement() {
    let catalog = catalog([
        TopicDraft::new("recovery", 10).unlocks(&["plasma_cannon"]),
        TopicDraft::new("plasma_theory", 10),
        TopicDraft::new("plasma_cannon", 30).requires(&["plasma_theory"]),
    ]);
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;
    let cannon = id(&catalog, "plasma_cannon");

    resolver.complete_research(&mut state, id(&catalog, "recovery"), true, None, &mut score);
    assert!(!resolver.available_projects(&state, None, false).contains(&cannon));

    resolver.complete_research(&mut state, id(&catalog, "plasma_theory"), true, None, &mut score);
    assert!(resolver.available_projects(&state, None, false).contains(&cannon));
}

// ===========================================================================
// Bonus pools
// ===========================================================================

#[test]
fn bonus_pool_exhaustion_hides_the_source() {
    let catalog = catalog([
        TopicDraft::new("interrogation", 20).bonus(&["origins", "hierarchy"]),
        TopicDraft::new("origins", 50),
        TopicDraft::new("hierarchy", 50),
    ]);
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;
    let source = id(&catalog, "interrogation");

    resolver.complete_research(&mut state, source, true, None, &mut score);
    assert!(resolver.has_remaining_bonus_value(&state, source));
    assert!(resolver.available_projects(&state, None, false).contains(&source));

    for name in ["origins", "hierarchy"] {
        resolver.complete_research(&mut state, id(&catalog, name), true, None, &mut score);
    }
    assert!(!resolver.has_remaining_bonus_value(&state, source));
    assert!(!resolver.available_projects(&state, None, false).contains(&source));
}

// ===========================================================================
// Cycles
// ===========================================================================

#[test]
fn checkpoint_ring_terminates_and_scores_each_once() {
    let catalog = catalog([
        TopicDraft::new("entry", 5).points(1).unlocks(&["ring0"]),
        TopicDraft::new("ring0", 0).points(10).unlocks(&["ring1"]),
        TopicDraft::new("ring1", 0).points(10).unlocks(&["ring2"]),
        TopicDraft::new("ring2", 0).points(10).unlocks(&["ring0"]),
    ]);
    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;

    let completion =
        resolver.complete_research(&mut state, id(&catalog, "entry"), true, None, &mut score);
    let cascade = completion.cascade().expect("applied");
    assert_eq!(cascade.discovered.len(), 4);
    assert_eq!(score, 31);
    assert_eq!(state.discovered_count(), 4);
}
