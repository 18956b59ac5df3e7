//! Station dataset loading.
//!
//! Fetches the station location and station price documents (over HTTP or
//! from local snapshot files), parses them into typed records, and hands
//! them to [`fuelmap_core::join`].

pub mod client;
pub mod error;
pub mod loader;
pub mod parse;
pub mod source;

pub use client::FeedClient;
pub use error::FeedError;
pub use loader::{
    download_snapshot, load_catalog, load_datasets, load_locations, load_prices, DatasetPair,
    SnapshotPaths, LOCATIONS_FILE, PRICES_FILE,
};
pub use parse::{parse_locations, parse_prices};
pub use source::{DatasetKind, DatasetSource, DatasetSources};
