//! Research walkthrough: checkpoints, protected topics and the cascade.
//!
//! Builds a four-topic catalog in code. Two paid topics share a free
//! checkpoint, and a protected topic requires that checkpoint. Completing
//! either paid topic cascades into the checkpoint, which opens the
//! protected topic.
//!
//! Run with: `cargo run -p techweb-examples --example research_walkthrough`
//! (set `RUST_LOG=techweb=debug` to see resolver logs).

use techweb_core::catalog::{Catalog, TopicDraft};
use techweb_core::id::TopicId;
use techweb_research::{Completion, ResearchEvent, Resolver, ResolverState};
use tracing_subscriber::EnvFilter;

fn names(catalog: &Catalog, ids: &[TopicId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| catalog.name(id))
        .map(str::to_string)
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Catalog ---

    let catalog = Catalog::from_drafts([
        TopicDraft::new("plasma_pistol", 5).points(10).unlocks(&["plasma_theory"]),
        TopicDraft::new("plasma_rifle", 5).points(10).unlocks(&["plasma_theory"]),
        TopicDraft::new("plasma_theory", 0).points(3),
        TopicDraft::new("plasma_cannon", 10)
            .points(20)
            .requires(&["plasma_theory"]),
    ])
    .expect("catalog is valid");

    let resolver = Resolver::new(&catalog);
    let mut state = ResolverState::new();
    let mut score = 0i64;

    println!(
        "Startable at campaign start: {:?}",
        names(&catalog, &resolver.startable_projects(&state, None, false))
    );

    // --- Complete the pistol ---

    let before = resolver.available_projects(&state, None, false);
    let pistol = catalog.topic_id("plasma_pistol").expect("declared");
    match resolver.complete_research(&mut state, pistol, true, None, &mut score) {
        Completion::Applied(cascade) => {
            println!(
                "Completed plasma_pistol; discovered {:?}, score +{}",
                names(&catalog, &cascade.discovered),
                cascade.score
            );
        }
        other => println!("Unexpected completion: {other:?}"),
    }

    let discovered: Vec<TopicId> = state.discovered().collect();
    println!("Discovery Set: {:?}", names(&catalog, &discovered));
    println!(
        "Newly available: {:?}",
        names(
            &catalog,
            &resolver.newly_available_since(&before, &state, None, false)
        )
    );

    // --- Events ---

    for event in state.drain_events() {
        match event {
            ResearchEvent::TopicDiscovered { topic, points } => {
                println!("  event: discovered {} (+{points})", catalog.name(topic).unwrap_or("?"));
            }
            other => println!("  event: {other:?}"),
        }
    }

    // --- Re-completion is a no-op for score ---

    resolver.complete_research(&mut state, pistol, true, None, &mut score);
    println!("Score after repeating plasma_pistol: {score}");
}
