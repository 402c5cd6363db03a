//! Topic catalog: immutable research topic definitions and derived unlockables.
//!
//! Topics refer to each other by [`TopicId`], never by reference. The catalog
//! is assembled through a [`CatalogBuilder`] that takes drafts keyed by name,
//! then resolves every name in one pass at [`CatalogBuilder::build`]. Any
//! dangling reference fails the build with the offending topic and field.

use crate::capability::{Capabilities, MAX_CAPABILITIES};
use crate::id::{TopicId, UnlockableId};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// A research topic. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    /// Effort units. Zero marks a checkpoint topic.
    pub cost: u32,
    /// Score awarded on first discovery.
    pub points: i64,
    /// All must be discovered before the topic is offered by plain dependency checking.
    pub dependencies: Vec<TopicId>,
    /// All must be discovered, always. A non-empty list makes the topic protected:
    /// it is only offered after an explicit unlock.
    pub requirements: Vec<TopicId>,
    /// Topics eligible for cascading completion when this one completes.
    pub unlocks: Vec<TopicId>,
    /// Topics forcibly un-discovered and locked on completion.
    pub disables: Vec<TopicId>,
    /// Topics whose lock is lifted on completion.
    pub reenables: Vec<TopicId>,
    /// "Get one free" pool.
    pub bonus_pool: Vec<TopicId>,
    /// Bonus pools that only open once their key topic is discovered.
    pub protected_bonus: Vec<(TopicId, Vec<TopicId>)>,
    /// Pick the first eligible bonus instead of a random one.
    pub sequential_bonus: bool,
    /// A matching item must be held at the site to start.
    pub needs_item: bool,
    /// The matching item is consumed on completion.
    pub destroys_item: bool,
    pub required_functions: Capabilities,
    /// Alias completed together with this topic.
    pub lookup: Option<TopicId>,
}

impl Topic {
    /// A checkpoint is a zero-cost topic encoding an AND/OR gate.
    pub fn is_checkpoint(&self) -> bool {
        self.cost == 0
    }

    /// A protected topic is only reachable through an explicit unlock edge.
    pub fn is_protected(&self) -> bool {
        !self.requirements.is_empty()
    }
}

/// What kind of derived content a topic can make available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UnlockableKind {
    Manufacture,
    Purchase,
    Facility,
}

impl UnlockableKind {
    pub const ALL: [UnlockableKind; 3] = [
        UnlockableKind::Manufacture,
        UnlockableKind::Purchase,
        UnlockableKind::Facility,
    ];
}

/// Derived content gated on a set of discovered topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unlockable {
    pub id: UnlockableId,
    pub name: String,
    pub kind: UnlockableKind,
    pub requires: Vec<TopicId>,
}

// ---------------------------------------------------------------------------
// Drafts (name-keyed, unresolved)
// ---------------------------------------------------------------------------

/// A topic definition whose cross-references are still names.
#[derive(Debug, Clone, Default)]
pub struct TopicDraft {
    pub name: String,
    pub cost: u32,
    pub points: i64,
    pub dependencies: Vec<String>,
    pub requirements: Vec<String>,
    pub unlocks: Vec<String>,
    pub disables: Vec<String>,
    pub reenables: Vec<String>,
    pub bonus_pool: Vec<String>,
    pub protected_bonus: Vec<(String, Vec<String>)>,
    pub sequential_bonus: bool,
    pub needs_item: bool,
    pub destroys_item: bool,
    pub required_functions: Vec<String>,
    pub lookup: Option<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl TopicDraft {
    pub fn new(name: &str, cost: u32) -> Self {
        Self {
            name: name.to_string(),
            cost,
            ..Self::default()
        }
    }

    pub fn points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn depends_on(mut self, names: &[&str]) -> Self {
        self.dependencies.extend(owned(names));
        self
    }

    pub fn requires(mut self, names: &[&str]) -> Self {
        self.requirements.extend(owned(names));
        self
    }

    pub fn unlocks(mut self, names: &[&str]) -> Self {
        self.unlocks.extend(owned(names));
        self
    }

    pub fn disables(mut self, names: &[&str]) -> Self {
        self.disables.extend(owned(names));
        self
    }

    pub fn reenables(mut self, names: &[&str]) -> Self {
        self.reenables.extend(owned(names));
        self
    }

    pub fn bonus(mut self, names: &[&str]) -> Self {
        self.bonus_pool.extend(owned(names));
        self
    }

    pub fn protected_bonus(mut self, key: &str, names: &[&str]) -> Self {
        self.protected_bonus.push((key.to_string(), owned(names)));
        self
    }

    pub fn sequential(mut self) -> Self {
        self.sequential_bonus = true;
        self
    }

    pub fn needs_item(mut self) -> Self {
        self.needs_item = true;
        self
    }

    pub fn destroys_item(mut self) -> Self {
        self.destroys_item = true;
        self
    }

    pub fn functions(mut self, names: &[&str]) -> Self {
        self.required_functions.extend(owned(names));
        self
    }

    pub fn lookup(mut self, name: &str) -> Self {
        self.lookup = Some(name.to_string());
        self
    }
}

/// An unlockable definition whose topic references are still names.
#[derive(Debug, Clone)]
pub struct UnlockableDraft {
    pub name: String,
    pub kind: UnlockableKind,
    pub requires: Vec<String>,
}

impl UnlockableDraft {
    pub fn new(name: &str, kind: UnlockableKind, requires: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            requires: owned(requires),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Data-integrity errors detected while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate topic name: {0}")]
    DuplicateTopic(String),

    #[error("duplicate unlockable name: {0}")]
    DuplicateUnlockable(String),

    #[error("topic '{topic}' references unknown topic '{reference}' in `{field}`")]
    UnknownTopic {
        topic: String,
        field: &'static str,
        reference: String,
    },

    #[error("unlockable '{unlockable}' requires unknown topic '{reference}'")]
    UnknownRequirement {
        unlockable: String,
        reference: String,
    },

    #[error("topic '{topic}' references itself in `{field}`")]
    SelfReference { topic: String, field: &'static str },

    #[error("capability '{0}' exceeds the limit of {MAX_CAPABILITIES} distinct functions")]
    TooManyCapabilities(String),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`Catalog`].
/// Two-phase lifecycle: declaration -> resolution.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    topics: Vec<TopicDraft>,
    topic_name_to_id: HashMap<String, TopicId>,
    unlockables: Vec<UnlockableDraft>,
    unlockable_name_to_id: HashMap<String, UnlockableId>,
    capabilities: Vec<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Declare a topic. Returns the id it will carry in the catalog.
    pub fn declare_topic(&mut self, draft: TopicDraft) -> Result<TopicId, CatalogError> {
        if self.topic_name_to_id.contains_key(&draft.name) {
            return Err(CatalogError::DuplicateTopic(draft.name));
        }
        let id = TopicId(self.topics.len() as u32);
        self.topic_name_to_id.insert(draft.name.clone(), id);
        self.topics.push(draft);
        Ok(id)
    }

    /// Phase 1: Declare a derived unlockable.
    pub fn declare_unlockable(
        &mut self,
        draft: UnlockableDraft,
    ) -> Result<UnlockableId, CatalogError> {
        if self.unlockable_name_to_id.contains_key(&draft.name) {
            return Err(CatalogError::DuplicateUnlockable(draft.name));
        }
        let id = UnlockableId(self.unlockables.len() as u32);
        self.unlockable_name_to_id.insert(draft.name.clone(), id);
        self.unlockables.push(draft);
        Ok(id)
    }

    /// Phase 1: Register a capability name, returning its bit. Registering
    /// the same name twice returns the same bit.
    pub fn capability(&mut self, name: &str) -> Result<Capabilities, CatalogError> {
        if let Some(idx) = self.capabilities.iter().position(|c| c == name) {
            return Ok(Capabilities::bit(idx as u32));
        }
        if self.capabilities.len() >= MAX_CAPABILITIES {
            return Err(CatalogError::TooManyCapabilities(name.to_string()));
        }
        self.capabilities.push(name.to_string());
        Ok(Capabilities::bit((self.capabilities.len() - 1) as u32))
    }

    /// Lookup a declared topic id by name.
    pub fn topic_id(&self, name: &str) -> Option<TopicId> {
        self.topic_name_to_id.get(name).copied()
    }

    /// Phase 2: Resolve every name and freeze the catalog.
    pub fn build(mut self) -> Result<Catalog, CatalogError> {
        let drafts = std::mem::take(&mut self.topics);
        let mut topics = Vec::with_capacity(drafts.len());

        for (idx, draft) in drafts.iter().enumerate() {
            let id = TopicId(idx as u32);
            let resolve = |field: &'static str, names: &[String]| {
                self.resolve_topics(&draft.name, field, names)
            };

            let disables = resolve("disables", &draft.disables)?;
            if disables.contains(&id) {
                return Err(CatalogError::SelfReference {
                    topic: draft.name.clone(),
                    field: "disables",
                });
            }

            let protected_bonus = draft
                .protected_bonus
                .iter()
                .map(|(key, pool)| {
                    let key = self.resolve_topic(&draft.name, "protected_bonus", key)?;
                    let pool = resolve("protected_bonus", pool)?;
                    Ok((key, pool))
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;

            let lookup = match &draft.lookup {
                Some(name) => Some(self.resolve_topic(&draft.name, "lookup", name)?),
                None => None,
            };

            topics.push(Topic {
                id,
                name: draft.name.clone(),
                cost: draft.cost,
                points: draft.points,
                dependencies: resolve("dependencies", &draft.dependencies)?,
                requirements: resolve("requirements", &draft.requirements)?,
                unlocks: resolve("unlocks", &draft.unlocks)?,
                disables,
                reenables: resolve("reenables", &draft.reenables)?,
                bonus_pool: resolve("bonus_pool", &draft.bonus_pool)?,
                protected_bonus,
                sequential_bonus: draft.sequential_bonus,
                needs_item: draft.needs_item,
                destroys_item: draft.destroys_item,
                required_functions: Capabilities::empty(),
                lookup,
            });
        }

        // Capability bits are assigned after topic references so that a
        // dangling topic name is reported before a capability overflow.
        for (topic, draft) in topics.iter_mut().zip(drafts.iter()) {
            for function in &draft.required_functions {
                topic.required_functions |= self.capability(function)?;
            }
        }

        let unlockables = self
            .unlockables
            .iter()
            .enumerate()
            .map(|(idx, draft)| {
                let requires = draft
                    .requires
                    .iter()
                    .map(|name| {
                        self.topic_id(name)
                            .ok_or_else(|| CatalogError::UnknownRequirement {
                                unlockable: draft.name.clone(),
                                reference: name.clone(),
                            })
                    })
                    .collect::<Result<Vec<_>, CatalogError>>()?;
                Ok(Unlockable {
                    id: UnlockableId(idx as u32),
                    name: draft.name.clone(),
                    kind: draft.kind,
                    requires,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Catalog {
            topics,
            topic_name_to_id: self.topic_name_to_id,
            unlockables,
            unlockable_name_to_id: self.unlockable_name_to_id,
            capability_names: self.capabilities,
        })
    }

    fn resolve_topic(
        &self,
        topic: &str,
        field: &'static str,
        name: &str,
    ) -> Result<TopicId, CatalogError> {
        self.topic_id(name).ok_or_else(|| CatalogError::UnknownTopic {
            topic: topic.to_string(),
            field,
            reference: name.to_string(),
        })
    }

    fn resolve_topics(
        &self,
        topic: &str,
        field: &'static str,
        names: &[String],
    ) -> Result<Vec<TopicId>, CatalogError> {
        names
            .iter()
            .map(|name| self.resolve_topic(topic, field, name))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable topic catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
    topic_name_to_id: HashMap<String, TopicId>,
    unlockables: Vec<Unlockable>,
    unlockable_name_to_id: HashMap<String, UnlockableId>,
    capability_names: Vec<String>,
}

impl Catalog {
    /// Build a catalog straight from topic drafts.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = TopicDraft>,
    ) -> Result<Catalog, CatalogError> {
        let mut builder = CatalogBuilder::new();
        for draft in drafts {
            builder.declare_topic(draft)?;
        }
        builder.build()
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.get(id.index())
    }

    /// All topics in identity order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn topic_id(&self, name: &str) -> Option<TopicId> {
        self.topic_name_to_id.get(name).copied()
    }

    /// Name of a topic, if the id resolves.
    pub fn name(&self, id: TopicId) -> Option<&str> {
        self.topic(id).map(|t| t.name.as_str())
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn unlockable(&self, id: UnlockableId) -> Option<&Unlockable> {
        self.unlockables.get(id.index())
    }

    pub fn unlockables(&self) -> impl Iterator<Item = &Unlockable> {
        self.unlockables.iter()
    }

    pub fn unlockable_id(&self, name: &str) -> Option<UnlockableId> {
        self.unlockable_name_to_id.get(name).copied()
    }

    /// The bit assigned to a capability name.
    pub fn capability(&self, name: &str) -> Option<Capabilities> {
        self.capability_names
            .iter()
            .position(|c| c == name)
            .map(|idx| Capabilities::bit(idx as u32))
    }

    /// Combined mask for a list of capability names. Names the catalog has
    /// never seen contribute nothing, since no topic can require them.
    pub fn capabilities(&self, names: &[&str]) -> Capabilities {
        names
            .iter()
            .filter_map(|name| self.capability(name))
            .fold(Capabilities::empty(), |acc, bit| acc | bit)
    }

    pub fn capability_names(&self) -> &[String] {
        &self.capability_names
    }
}
