//! Loading pipeline: data directory -> [`Catalog`] + [`ResearchSettings`].

use crate::loader::{DataLoadError, deserialize_file, deserialize_list, find_data_file, require_data_file};
use crate::schema::{TopicData, UnlockableData};
use std::path::{Path, PathBuf};
use techweb_core::catalog::{Catalog, CatalogBuilder, CatalogError};
use techweb_core::lint::{CatalogWarning, lint_catalog};
use techweb_research::settings::ResearchSettings;

/// Everything a research data directory defines.
#[derive(Debug)]
pub struct ResearchData {
    pub catalog: Catalog,
    pub settings: ResearchSettings,
    /// Lint findings. Loading still succeeds; hosts decide what to do.
    pub warnings: Vec<CatalogWarning>,
}

/// Load a research data directory.
///
/// - `topics.{ron,toml,json}` is required.
/// - `unlockables.{ron,toml,json}` is optional.
/// - `settings.{ron,toml,json}` is optional; missing fields use defaults.
pub fn load_research_data(dir: &Path) -> Result<ResearchData, DataLoadError> {
    let topics_path = require_data_file(dir, "topics")?;
    let topics: Vec<TopicData> = deserialize_list(&topics_path, "topics")?;

    let unlockables_path = find_data_file(dir, "unlockables")?;
    let unlockables: Vec<UnlockableData> = match &unlockables_path {
        Some(path) => deserialize_list(path, "unlockables")?,
        None => Vec::new(),
    };

    let settings: ResearchSettings = match find_data_file(dir, "settings")? {
        Some(path) => deserialize_file(&path)?,
        None => ResearchSettings::default(),
    };

    let catalog_error = |file: &PathBuf| {
        let file = file.clone();
        move |source: CatalogError| DataLoadError::Catalog { file, source }
    };

    let mut builder = CatalogBuilder::new();
    for topic in topics {
        builder
            .declare_topic(topic.into())
            .map_err(catalog_error(&topics_path))?;
    }
    if let Some(path) = &unlockables_path {
        for unlockable in unlockables {
            builder
                .declare_unlockable(unlockable.into())
                .map_err(catalog_error(path))?;
        }
    }

    let catalog = builder.build().map_err(|source| {
        let file = match (&source, &unlockables_path) {
            (CatalogError::UnknownRequirement { .. }, Some(path)) => path.clone(),
            _ => topics_path.clone(),
        };
        DataLoadError::Catalog { file, source }
    })?;

    let warnings = lint_catalog(&catalog);
    tracing::info!(
        target: "techweb::data",
        dir = %dir.display(),
        topics = catalog.topic_count(),
        unlockables = catalog.unlockables().count(),
        warnings = warnings.len(),
        "data.loaded"
    );

    Ok(ResearchData {
        catalog,
        settings,
        warnings,
    })
}
