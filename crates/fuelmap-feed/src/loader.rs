//! Loading both station documents and turning them into a catalog.

use std::path::{Path, PathBuf};

use fuelmap_core::{Catalog, PriceIndex, StationLocation};

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::parse::{parse_locations, parse_prices};
use crate::source::{DatasetSource, DatasetSources};

/// File name for the location document in a snapshot directory.
pub const LOCATIONS_FILE: &str = "estaciones.xml";
/// File name for the price document in a snapshot directory.
pub const PRICES_FILE: &str = "precios.xml";

/// Outcome of loading both documents; each side fails independently.
#[derive(Debug)]
pub struct DatasetPair {
    pub locations: Result<Vec<StationLocation>, FeedError>,
    pub prices: Result<PriceIndex, FeedError>,
}

impl DatasetPair {
    /// Both halves, or the first error.
    ///
    /// A failed price fetch is never replaced by an empty index: joining
    /// against it would make every station look unpriced.
    ///
    /// # Errors
    ///
    /// Returns the locations error if that side failed, otherwise the
    /// prices error.
    pub fn into_parts(self) -> Result<(Vec<StationLocation>, PriceIndex), FeedError> {
        Ok((self.locations?, self.prices?))
    }

    /// Join both halves into a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns either side's load error, or [`FeedError::Core`] wrapping
    /// a duplicate station id.
    pub fn into_catalog(self) -> Result<Catalog, FeedError> {
        let (locations, prices) = self.into_parts()?;
        Ok(Catalog::from_parts(locations, &prices)?)
    }
}

/// Fetch and parse the location document.
///
/// # Errors
///
/// Returns any fetch error from [`FeedClient::fetch_document`] or parse
/// error from [`parse_locations`].
pub async fn load_locations(
    client: &FeedClient,
    source: &DatasetSource,
) -> Result<Vec<StationLocation>, FeedError> {
    let body = client.fetch_document(source).await?;
    parse_locations(&body)
}

/// Fetch and parse the price document.
///
/// # Errors
///
/// Returns any fetch error from [`FeedClient::fetch_document`] or parse
/// error from [`parse_prices`].
pub async fn load_prices(
    client: &FeedClient,
    source: &DatasetSource,
) -> Result<PriceIndex, FeedError> {
    let body = client.fetch_document(source).await?;
    parse_prices(&body)
}

/// Load both documents concurrently and wait for both.
pub async fn load_datasets(client: &FeedClient, sources: &DatasetSources) -> DatasetPair {
    let (locations, prices) = tokio::join!(
        load_locations(client, &sources.locations),
        load_prices(client, &sources.prices),
    );

    if let Err(e) = &locations {
        tracing::warn!(source = %sources.locations, error = %e, "failed to load station locations");
    }
    if let Err(e) = &prices {
        tracing::warn!(source = %sources.prices, error = %e, "failed to load station prices");
    }

    DatasetPair { locations, prices }
}

/// Load both documents and join them.
///
/// # Errors
///
/// See [`DatasetPair::into_catalog`].
pub async fn load_catalog(
    client: &FeedClient,
    sources: &DatasetSources,
) -> Result<Catalog, FeedError> {
    let catalog = load_datasets(client, sources).await.into_catalog()?;
    tracing::info!(stations = catalog.len(), "station catalog loaded");
    Ok(catalog)
}

/// Paths written by [`download_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub locations: PathBuf,
    pub prices: PathBuf,
}

impl SnapshotPaths {
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            locations: dir.join(LOCATIONS_FILE),
            prices: dir.join(PRICES_FILE),
        }
    }

    /// File sources pointing at this snapshot.
    #[must_use]
    pub fn sources(&self) -> DatasetSources {
        DatasetSources {
            locations: DatasetSource::File(self.locations.clone()),
            prices: DatasetSource::File(self.prices.clone()),
        }
    }
}

/// Download both documents into `out_dir` as [`LOCATIONS_FILE`] and
/// [`PRICES_FILE`].
///
/// Both bodies are parsed before anything is written, so a snapshot on
/// disk is always loadable. No retries.
///
/// # Errors
///
/// Returns the first fetch or parse error, or [`FeedError::Io`] if the
/// directory or files cannot be written.
pub async fn download_snapshot(
    client: &FeedClient,
    sources: &DatasetSources,
    out_dir: &Path,
) -> Result<SnapshotPaths, FeedError> {
    let (locations_body, prices_body) = tokio::try_join!(
        client.fetch_document(&sources.locations),
        client.fetch_document(&sources.prices),
    )?;

    let station_count = parse_locations(&locations_body)?.len();
    let priced_count = parse_prices(&prices_body)?.len();

    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source: std::io::Error| FeedError::Io { path, source }
    };

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(io_err(out_dir))?;

    let paths = SnapshotPaths::in_dir(out_dir);
    tokio::fs::write(&paths.locations, locations_body)
        .await
        .map_err(io_err(&paths.locations))?;
    tokio::fs::write(&paths.prices, prices_body)
        .await
        .map_err(io_err(&paths.prices))?;

    tracing::info!(
        dir = %out_dir.display(),
        stations = station_count,
        priced = priced_count,
        "station snapshot written"
    );
    Ok(paths)
}
