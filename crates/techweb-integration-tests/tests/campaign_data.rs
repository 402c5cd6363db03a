//! End-to-end campaign over the example data directory.
//!
//! Loads the RON/TOML catalog shipped with `techweb-examples`, then plays a
//! short campaign through the `Laboratory` at a single base: free
//! checkpoints, a protected topic, an interrogation with lookup and bonus,
//! and a disable/reenable pair.

use std::path::{Path, PathBuf};
use techweb_core::catalog::{Catalog, UnlockableKind};
use techweb_core::id::TopicId;
use techweb_core::test_utils::*;
use techweb_data::{ResearchData, load_research_data};
use techweb_research::context::Site;
use techweb_research::laboratory::{CompletionReport, Laboratory};
use techweb_research::persist::SavedResearch;
use techweb_research::{Resolver, ResolverState, TopicStatus};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../techweb-examples/data")
}

fn load() -> ResearchData {
    load_research_data(&data_dir()).expect("example data loads")
}

fn unlockable_names(catalog: &Catalog, report: &CompletionReport) -> Vec<(UnlockableKind, String)> {
    report
        .unlockables
        .iter()
        .map(|&(kind, u)| (kind, catalog.unlockable(u).unwrap().name.clone()))
        .collect()
}

fn base(catalog: &Catalog) -> Site {
    let mut site = Site::new("Nevada", catalog.capabilities(&["alien_containment"]));
    site.add_item(id(catalog, "sectoid_corpse"), 1);
    site.add_item(id(catalog, "sectoid_soldier"), 1);
    site
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn example_data_loads_cleanly() {
    let data = load();
    assert!(data.warnings.is_empty(), "{:?}", data.warnings);
    assert_eq!(data.catalog.topic_count(), 12);
    assert_eq!(data.catalog.unlockables().count(), 5);
    assert_eq!(data.settings.rng_seed, 1999);
    assert!(data.settings.award_score);

    let soldier = data.catalog.topic(id(&data.catalog, "sectoid_soldier")).unwrap();
    assert_eq!(soldier.lookup, Some(id(&data.catalog, "sectoid")));
    assert_eq!(soldier.bonus_pool.len(), 2);
    assert!(!soldier.required_functions.is_empty());
}

// ===========================================================================
// Campaign
// ===========================================================================

#[test]
fn alloys_cascade_opens_the_protected_hangar_topic() {
    let data = load();
    let catalog = &data.catalog;
    let resolver = Resolver::new(catalog);
    let mut state = ResolverState::new();
    let mut site = base(catalog);
    let mut lab = Laboratory::new(data.settings.clone());
    let mut score = 0i64;

    let ufo = id(catalog, "ufo_construction");
    assert!(!resolver.available_projects(&state, Some(&site), false).contains(&ufo));

    let report = lab.finish(&resolver, &mut state, &mut site, &mut score, id(catalog, "alien_alloys"));
    assert!(report.applied);
    assert!(state.is_discovered(id(catalog, "alloy_analysis")));
    assert!(report.newly_available.contains(&ufo));
    assert_eq!(report.score, 12);
    assert_eq!(
        unlockable_names(catalog, &report),
        vec![(UnlockableKind::Purchase, "alloy_armor".to_string())]
    );

    let report = lab.finish(&resolver, &mut state, &mut site, &mut score, ufo);
    assert_eq!(
        unlockable_names(catalog, &report),
        vec![(UnlockableKind::Facility, "hangar".to_string())]
    );
    // The checkpoint's protected unlock is claimed; it drops off the list.
    assert!(
        !resolver
            .available_projects(&state, Some(&site), false)
            .contains(&id(catalog, "alloy_analysis"))
    );
}

#[test]
fn interrogation_files_lookup_and_grants_a_bonus() {
    let data = load();
    let catalog = &data.catalog;
    let resolver = Resolver::new(catalog);
    let mut state = ResolverState::new();
    let mut site = base(catalog);
    let mut lab = Laboratory::new(data.settings.clone());
    let mut score = 0i64;

    let soldier = id(catalog, "sectoid_soldier");
    assert!(resolver.startable_projects(&state, Some(&site), false).contains(&soldier));

    // Without the containment function the interrogation cannot start.
    let mut bare = Site::new("Cydonia", Default::default());
    bare.add_item(soldier, 1);
    assert!(!resolver.startable_projects(&state, Some(&bare), false).contains(&soldier));

    let report = lab.finish(&resolver, &mut state, &mut site, &mut score, soldier);
    assert_eq!(report.lookup, Some(id(catalog, "sectoid")));
    let bonus = report.bonus.expect("pool has open topics");
    assert!(ids(catalog, &["alien_origins", "psionics"]).contains(&bonus));
    assert!(state.is_discovered(bonus));
    assert_eq!(report.score, 10 + 2 + 30);
    assert_eq!(site.item_count(soldier), 0);

    // One pool entry remains, but the captive is gone.
    assert!(resolver.has_remaining_bonus_value(&state, soldier));
    assert!(!resolver.available_projects(&state, Some(&site), false).contains(&soldier));
}

#[test]
fn politics_disable_and_reenable_psionics() {
    let data = load();
    let catalog = &data.catalog;
    let resolver = Resolver::new(catalog);
    let mut state = ResolverState::new();
    let mut site = base(catalog);
    let mut lab = Laboratory::new(data.settings.clone());
    let mut score = 0i64;
    let psionics = id(catalog, "psionics");

    for name in ["sectoid_corpse", "sectoid", "psionics"] {
        lab.finish(&resolver, &mut state, &mut site, &mut score, id(catalog, name));
    }
    assert!(state.is_discovered(psionics));

    lab.finish(&resolver, &mut state, &mut site, &mut score, id(catalog, "rogue_cell"));
    assert_eq!(state.status(psionics), TopicStatus::Disabled);
    assert!(!state.is_discovered(psionics));

    let report = lab.finish(&resolver, &mut state, &mut site, &mut score, psionics);
    assert!(!report.applied);

    lab.finish(&resolver, &mut state, &mut site, &mut score, id(catalog, "amnesty"));
    assert_eq!(state.status(psionics), TopicStatus::New);
    assert!(
        resolver
            .startable_projects(&state, Some(&site), false)
            .contains(&psionics)
    );
}

// ===========================================================================
// Persistence
// ===========================================================================

#[test]
fn campaign_survives_a_save_round_trip() {
    let data = load();
    let catalog = &data.catalog;
    let resolver = Resolver::new(catalog);
    let mut state = ResolverState::new();
    let mut site = base(catalog);
    let mut lab = Laboratory::new(data.settings.clone());
    let mut score = 0i64;

    for name in ["alien_alloys", "laser_weapons", "rogue_cell"] {
        lab.finish(&resolver, &mut state, &mut site, &mut score, id(catalog, name));
    }

    let json = serde_json::to_string_pretty(&state.to_saved(catalog)).unwrap();
    let saved: SavedResearch = serde_json::from_str(&json).unwrap();
    let restored = ResolverState::from_saved(catalog, &saved);

    let discovered: Vec<TopicId> = restored.discovered().collect();
    assert_eq!(
        discovered,
        ids(catalog, &["alien_alloys", "alloy_analysis", "laser_weapons", "rogue_cell"])
    );
    assert!(restored.is_disabled(id(catalog, "psionics")));
    assert_eq!(
        resolver.available_projects(&restored, Some(&site), false),
        resolver.available_projects(&state, Some(&site), false)
    );
}
