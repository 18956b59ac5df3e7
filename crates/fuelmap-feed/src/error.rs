use fuelmap_core::CoreError;
use thiserror::Error;

use crate::source::DatasetKind;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid dataset URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error in {document} document: {error}")]
    Xml {
        document: DatasetKind,
        #[source]
        error: quick_xml::Error,
    },

    /// A required field is missing or has the wrong shape.
    #[error("malformed {document} document: {reason}")]
    Malformed {
        document: DatasetKind,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl FeedError {
    pub(crate) fn malformed(document: DatasetKind, reason: impl Into<String>) -> Self {
        Self::Malformed {
            document,
            reason: reason.into(),
        }
    }
}
