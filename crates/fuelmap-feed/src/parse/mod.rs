//! XML parsing for the station documents.
//!
//! Both documents are read with a streaming `quick_xml` reader; every record
//! is validated at this boundary so downstream code only sees typed values.

mod locations;
mod prices;

pub use locations::parse_locations;
pub use prices::parse_prices;

use quick_xml::events::{BytesStart, BytesText};

use crate::error::FeedError;
use crate::source::DatasetKind;

/// Read an attribute value, unescaped and trimmed.
fn attribute(
    element: &BytesStart<'_>,
    name: &str,
    document: DatasetKind,
) -> Result<Option<String>, FeedError> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| FeedError::Xml {
            document,
            error: e.into(),
        })?;
    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|error| FeedError::Xml { document, error })?;
            Ok(Some(value.trim().to_string()))
        }
        None => Ok(None),
    }
}

/// The `place_id` of a `<place>` element; required and non-empty.
fn place_id(element: &BytesStart<'_>, document: DatasetKind) -> Result<String, FeedError> {
    match attribute(element, "place_id", document)? {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(FeedError::malformed(
            document,
            "<place> element without a place_id",
        )),
    }
}

fn text(event: &BytesText<'_>, document: DatasetKind) -> Result<String, FeedError> {
    event
        .unescape()
        .map(std::borrow::Cow::into_owned)
        .map_err(|error| FeedError::Xml { document, error })
}
