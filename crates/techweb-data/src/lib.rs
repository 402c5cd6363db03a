//! Data-driven topic catalogs for Techweb.
//!
//! A data directory holds a required `topics` file plus optional
//! `unlockables` and `settings` files, each in RON, TOML or JSON. Names are
//! resolved into a [`techweb_core::catalog::Catalog`] and the catalog lint
//! runs once on load.

pub mod loader;
pub mod research_data;
pub mod schema;

pub use loader::DataLoadError;
pub use research_data::{ResearchData, load_research_data};
