//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available everywhere tests run (via the `test-utils` feature).

use crate::catalog::{Catalog, TopicDraft};
use crate::id::TopicId;

// ===========================================================================
// Catalog shorthands
// ===========================================================================

/// Build a catalog from drafts, panicking on invalid data.
pub fn catalog(drafts: impl IntoIterator<Item = TopicDraft>) -> Catalog {
    Catalog::from_drafts(drafts).expect("test catalog must be valid")
}

/// Resolve a topic name, panicking if it is not declared.
pub fn id(catalog: &Catalog, name: &str) -> TopicId {
    catalog
        .topic_id(name)
        .unwrap_or_else(|| panic!("unknown test topic '{name}'"))
}

/// Resolve several topic names, sorted into identity order.
pub fn ids(catalog: &Catalog, names: &[&str]) -> Vec<TopicId> {
    let mut out: Vec<TopicId> = names.iter().map(|n| id(catalog, n)).collect();
    out.sort();
    out
}

/// Names of the given ids, for readable assertion failures.
pub fn names(catalog: &Catalog, ids: &[TopicId]) -> Vec<String> {
    ids.iter()
        .map(|&i| catalog.name(i).unwrap_or("<unknown>").to_string())
        .collect()
}

// ===========================================================================
// Canned catalogs
// ===========================================================================

/// Two paid topics sharing one checkpoint, and a protected topic behind it:
///
/// ```text
/// a (5) --unlocks--> f (0) <--unlocks-- b (5)
///                    f ==requirement==> g (10)
/// ```
pub fn checkpoint_catalog() -> Catalog {
    catalog([
        TopicDraft::new("a", 5).points(10).unlocks(&["f"]),
        TopicDraft::new("b", 5).points(10).unlocks(&["f"]),
        TopicDraft::new("f", 0).points(3),
        TopicDraft::new("g", 10).points(20).requires(&["f"]),
    ])
}

/// A wide layered catalog for benchmarks and property tests: `layers`
/// tiers of `width` topics. Each topic depends on two topics from the tier
/// below and every tier ends in a checkpoint unlocked by its first topic.
pub fn layered_catalog(layers: usize, width: usize) -> Catalog {
    let mut drafts = Vec::with_capacity(layers * (width + 1));
    for layer in 0..layers {
        for col in 0..width {
            let mut draft = TopicDraft::new(&format!("t{layer}_{col}"), 10).points(1);
            if layer > 0 {
                let left = format!("t{}_{}", layer - 1, col);
                let right = format!("t{}_{}", layer - 1, (col + 1) % width);
                draft = draft.depends_on(&[left.as_str(), right.as_str()]);
            }
            if col == 0 {
                draft = draft.unlocks(&[format!("gate{layer}").as_str()]);
            }
            drafts.push(draft);
        }
        drafts.push(
            TopicDraft::new(&format!("gate{layer}"), 0)
                .points(1)
                .depends_on(&[format!("t{layer}_0").as_str()]),
        );
    }
    catalog(drafts)
}
