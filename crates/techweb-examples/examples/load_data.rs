//! Data-driven campaign: load a research catalog from disk and play it out.
//!
//! Loads `data/topics.ron`, `data/unlockables.ron` and `data/settings.toml`,
//! then repeatedly finishes the first startable project at a single base
//! through the `Laboratory`, printing each completion report.
//!
//! Run with: `cargo run -p techweb-examples --example load_data`

use std::path::Path;
use techweb_core::id::TopicId;
use techweb_data::load_research_data;
use techweb_research::context::Site;
use techweb_research::laboratory::Laboratory;
use techweb_research::{Resolver, ResolverState};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let data = load_research_data(&dir).expect("example data loads");
    for warning in &data.warnings {
        println!("lint: {warning:?}");
    }

    let catalog = &data.catalog;
    let name = |id: TopicId| catalog.name(id).unwrap_or("?");
    let resolver = Resolver::new(catalog);
    let mut state = ResolverState::new();
    let mut laboratory = Laboratory::new(data.settings.clone());
    let mut score = 0i64;

    // --- Base setup ---

    let mut base = Site::new("Nevada", catalog.capabilities(&["alien_containment"]));
    for item in ["sectoid_corpse", "sectoid_soldier"] {
        base.add_item(catalog.topic_id(item).expect("declared"), 1);
    }

    // --- Campaign loop ---

    for month in 1.. {
        let startable = resolver.startable_projects(&state, Some(&base), false);
        let Some(&topic) = startable.first() else {
            println!("Nothing left to research after {} months.", month - 1);
            break;
        };

        let report = laboratory.finish(&resolver, &mut state, &mut base, &mut score, topic);
        println!("Month {month}: finished {}", name(topic));
        if let Some(lookup) = report.lookup {
            println!("  also filed under {}", name(lookup));
        }
        if let Some(bonus) = report.bonus {
            println!("  got one free: {}", name(bonus));
        }
        for &fresh in &report.newly_available {
            println!("  now available: {}", name(fresh));
        }
        for (kind, unlockable) in &report.unlockables {
            let unlockable = catalog.unlockable(*unlockable).map_or("?", |u| u.name.as_str());
            println!("  {kind:?} unlocked: {unlockable}");
        }
        for event in state.drain_events() {
            println!("  event: {event:?}");
        }
    }

    println!("Final score: {score}");
    println!("Save snapshot: {:#?}", state.to_saved(catalog));
}
