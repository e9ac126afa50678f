use crate::config::Config;
use addonhub_core::handler::addons::AddonIndex;
use addonhub_core::search::MemoryIndex;
use addonhub_core::types::addon::Addon;
use thiserror::Error;

// Embedded catalog so the gateway starts without any data files
const CATALOG_DATA_JSON: &str = include_str!("../catalog_data.json");

#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub fn parse_catalog(content: &str) -> Result<Vec<Addon>, CatalogLoadError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_catalog(config: &Config) -> Result<AddonIndex, CatalogLoadError> {
    let addons = match &config.catalog.path {
        Some(path) => parse_catalog(&std::fs::read_to_string(path)?)?,
        None => parse_catalog(CATALOG_DATA_JSON)?,
    };

    ::tracing::info!("Loaded {} add-ons into the search index", addons.len());

    let index = MemoryIndex::new(addons);
    Ok(match config.search.max_result_window {
        Some(max) => index.with_max_result_window(max),
        None => index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use addonhub_core::search::{SearchQuery, Searchable};

    #[test]
    fn test_embedded_catalog_parses() {
        let addons = parse_catalog(CATALOG_DATA_JSON).unwrap();

        assert!(addons.len() >= 20);
        assert!(addons.iter().any(|addon| addon.matches("tab")));
    }

    #[test]
    fn test_load_applies_engine_window() {
        let mut config = Config::default();
        config.search.max_result_window = Some(10);

        let index = load_catalog(&config).unwrap();

        assert_eq!(index.max_result_window(), Some(10));
        assert!(index.query().execute(5..15).is_err());
        assert!(index.query().execute(5..10).is_ok());
    }

    #[test]
    fn test_missing_catalog_file() {
        let mut config = Config::default();
        config.catalog.path = Some("/nonexistent/addonhub/catalog.json".to_string());

        assert!(matches!(
            load_catalog(&config),
            Err(CatalogLoadError::IoError(_))
        ));
    }
}
