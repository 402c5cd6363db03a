//! Techweb Core -- the research topic catalog shared by every Techweb crate.
//!
//! This crate provides the immutable topic catalog, the identity types used
//! to cross-reference topics, the site capability bitset, a catalog lint for
//! modeling hazards, and a deterministic PRNG for bonus draws.
//!
//! # Identity, not pointers
//!
//! Topics never hold references to other topics. Every edge (`dependencies`,
//! `unlocks`, `disables`, ...) is a [`id::TopicId`] resolved through the
//! [`catalog::Catalog`], so cyclic tech graphs need no shared ownership.
//!
//! ```rust,ignore
//! let catalog = Catalog::from_drafts([
//!     TopicDraft::new("alien_alloys", 50).unlocks(&["alloy_gate"]),
//!     TopicDraft::new("alloy_gate", 0),
//! ])?;
//! let alloys = catalog.topic_id("alien_alloys").unwrap();
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable registry of topics and unlockables.
//! - [`catalog::CatalogBuilder`] -- Name-keyed declaration, resolved at build.
//! - [`capability::Capabilities`] -- Functions a site provides / a topic needs.
//! - [`lint::lint_catalog`] -- Cycle and reachability warnings.
//! - [`rng::SimRng`] -- SplitMix64 PRNG for deterministic bonus draws.

pub mod capability;
pub mod catalog;
pub mod id;
pub mod lint;
pub mod rng;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
