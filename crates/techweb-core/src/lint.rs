//! Catalog lint: data-modeling hazards that are legal but suspicious.
//!
//! Nothing here is fatal. A cycle in `unlocks` or `dependencies` still
//! resolves at runtime (the cascade enqueues each topic at most once), but
//! some cycle members may stay undiscovered until a later, separate trigger.
//! Content authors want to hear about that before players do.

use crate::catalog::Catalog;
use crate::id::TopicId;
use std::collections::{BTreeSet, VecDeque};

/// A suspicious construct found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// Topics on (or between) cycles of `unlocks` edges, sorted by id.
    UnlockCycle(Vec<TopicId>),
    /// Topics on (or between) cycles of `dependencies` edges, sorted by id.
    DependencyCycle(Vec<TopicId>),
    /// A protected topic that no topic lists in `unlocks`, so it can never be offered.
    UnreachableProtected(TopicId),
    /// A checkpoint with no dependencies that nothing unlocks. It is open
    /// from the very start and completes as a side effect of the first cascade.
    OpenCheckpoint(TopicId),
}

/// Run every lint over the catalog. Warnings are ordered by kind, then id.
pub fn lint_catalog(catalog: &Catalog) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    let unlock_edges: Vec<(TopicId, TopicId)> = catalog
        .topics()
        .flat_map(|t| t.unlocks.iter().map(move |&to| (t.id, to)))
        .collect();
    let cyclic = cycle_members(catalog.topic_count(), &unlock_edges);
    if !cyclic.is_empty() {
        warnings.push(CatalogWarning::UnlockCycle(cyclic));
    }

    let dependency_edges: Vec<(TopicId, TopicId)> = catalog
        .topics()
        .flat_map(|t| t.dependencies.iter().map(move |&from| (from, t.id)))
        .collect();
    let cyclic = cycle_members(catalog.topic_count(), &dependency_edges);
    if !cyclic.is_empty() {
        warnings.push(CatalogWarning::DependencyCycle(cyclic));
    }

    let unlocked: BTreeSet<TopicId> = unlock_edges.iter().map(|&(_, to)| to).collect();

    for topic in catalog.topics() {
        if topic.is_protected() && !unlocked.contains(&topic.id) {
            warnings.push(CatalogWarning::UnreachableProtected(topic.id));
        }
    }

    for topic in catalog.topics() {
        if topic.is_checkpoint()
            && !topic.is_protected()
            && topic.dependencies.is_empty()
            && !unlocked.contains(&topic.id)
        {
            warnings.push(CatalogWarning::OpenCheckpoint(topic.id));
        }
    }

    for warning in &warnings {
        tracing::warn!(target: "techweb::lint", ?warning, "catalog.lint");
    }

    warnings
}

/// Nodes that survive both a forward and a backward Kahn pass: every node
/// on a cycle, plus any node sitting on a path between two cycles.
fn cycle_members(node_count: usize, edges: &[(TopicId, TopicId)]) -> Vec<TopicId> {
    let forward = kahn_leftovers(node_count, edges.iter().copied());
    if forward.is_empty() {
        return Vec::new();
    }
    let backward = kahn_leftovers(node_count, edges.iter().map(|&(a, b)| (b, a)));
    forward.intersection(&backward).copied().collect()
}

/// Run Kahn's algorithm and return the nodes it could not order.
fn kahn_leftovers(
    node_count: usize,
    edges: impl Iterator<Item = (TopicId, TopicId)>,
) -> BTreeSet<TopicId> {
    let mut in_degree = vec![0usize; node_count];
    let mut outputs: Vec<Vec<usize>> = vec![Vec::new(); node_count];

    for (from, to) in edges {
        let (from, to) = (from.index(), to.index());
        if from >= node_count || to >= node_count {
            continue;
        }
        outputs[from].push(to);
        in_degree[to] += 1;
    }

    let mut queue: VecDeque<usize> = (0..node_count).filter(|&n| in_degree[n] == 0).collect();
    let mut ordered = vec![false; node_count];

    while let Some(node) = queue.pop_front() {
        ordered[node] = true;
        for &dest in &outputs[node] {
            in_degree[dest] -= 1;
            if in_degree[dest] == 0 {
                queue.push_back(dest);
            }
        }
    }

    (0..node_count)
        .filter(|&n| !ordered[n])
        .map(|n| TopicId(n as u32))
        .collect()
}
