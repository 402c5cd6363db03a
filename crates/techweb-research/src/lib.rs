//! Techweb Research -- the tech-tree resolver.
//!
//! Given an immutable [`techweb_core::catalog::Catalog`] and a mutable
//! [`state::ResolverState`], this crate answers which topics may be
//! researched, applies completed research (including the cascade of free
//! checkpoint topics), draws "get one free" bonus topics, and reports what
//! became newly available.
//!
//! # Overview
//!
//! The [`resolver::Resolver`] borrows the catalog and holds nothing else.
//! Every operation takes the state explicitly:
//!
//! ```rust,ignore
//! let resolver = Resolver::new(&catalog);
//! let mut state = ResolverState::new();
//! let before = resolver.available_projects(&state, Some(&site), false);
//! resolver.complete_research(&mut state, topic, true, Some(&site), &mut score);
//! let fresh = resolver.newly_available_since(&before, &state, Some(&site), false);
//! ```
//!
//! Completion is a worklist cascade, not recursion: each zero-cost topic
//! it opens is enqueued at most once per call, so cyclic `unlocks`
//! terminate and deep chains never grow the stack.
//!
//! # Key Types
//!
//! - [`resolver::Resolver`] -- Availability, completion and bonus selection.
//! - [`state::ResolverState`] -- Discovery Set, Status Table, shown set, events.
//! - [`context::ResearchContext`] -- Site queries (items, running projects, functions).
//! - [`laboratory::Laboratory`] -- The full end-of-project flow with a report.
//! - [`persist::SavedResearch`] -- Name-keyed save snapshot.

pub mod context;
pub mod dependable;
pub mod diff;
pub mod laboratory;
pub mod persist;
pub mod resolver;
pub mod settings;
pub mod state;

pub use diff::diff_newly_available;
pub use resolver::{Cascade, Completion, Resolver};
pub use state::{ResearchEvent, ResolverState, TopicStatus};
