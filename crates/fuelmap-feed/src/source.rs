//! Where station documents are read from.

use std::path::PathBuf;

use fuelmap_core::SourceConfig;

/// Which of the two station documents a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Locations,
    Prices,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Locations => write!(f, "locations"),
            DatasetKind::Prices => write!(f, "prices"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Url(url) => f.write_str(url),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The pair of documents a session loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    pub locations: DatasetSource,
    pub prices: DatasetSource,
}

impl DatasetSources {
    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        match config {
            SourceConfig::Remote {
                locations_url,
                prices_url,
            } => Self {
                locations: DatasetSource::Url(locations_url.clone()),
                prices: DatasetSource::Url(prices_url.clone()),
            },
            SourceConfig::Local {
                locations_path,
                prices_path,
            } => Self {
                locations: DatasetSource::File(locations_path.clone()),
                prices: DatasetSource::File(prices_path.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_remote_config() {
        let sources = DatasetSources::from_config(&SourceConfig::Remote {
            locations_url: "https://example.test/places".to_string(),
            prices_url: "https://example.test/prices".to_string(),
        });
        assert_eq!(
            sources.locations,
            DatasetSource::Url("https://example.test/places".to_string())
        );
        assert_eq!(
            sources.prices,
            DatasetSource::Url("https://example.test/prices".to_string())
        );
    }

    #[test]
    fn from_local_config() {
        let sources = DatasetSources::from_config(&SourceConfig::Local {
            locations_path: PathBuf::from("snap/estaciones.xml"),
            prices_path: PathBuf::from("snap/precios.xml"),
        });
        assert_eq!(sources.locations.to_string(), "snap/estaciones.xml");
        assert!(matches!(sources.prices, DatasetSource::File(_)));
    }
}
