use fuelmap_core::{FuelType, PriceEntry, PriceIndex};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{attribute, place_id, text};
use crate::error::FeedError;
use crate::source::DatasetKind;

const DOC: DatasetKind = DatasetKind::Prices;

/// A `<gas_price>` element whose text has not been read yet.
struct PendingPrice {
    fuel_type: FuelType,
    raw: String,
}

fn open_price(
    element: &BytesStart<'_>,
    place: Option<&String>,
) -> Result<PendingPrice, FeedError> {
    let Some(station_id) = place else {
        return Err(FeedError::malformed(
            DOC,
            "<gas_price> outside of a <place> element",
        ));
    };
    let label = attribute(element, "type", DOC)?
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            FeedError::malformed(
                DOC,
                format!("station {station_id}: <gas_price> without a type"),
            )
        })?;
    Ok(PendingPrice {
        fuel_type: FuelType::from_label(&label),
        raw: String::new(),
    })
}

fn close_price(station_id: &str, pending: PendingPrice) -> Result<PriceEntry, FeedError> {
    let raw = pending.raw.trim();
    let amount = raw.parse::<f64>().map_err(|_| {
        FeedError::malformed(
            DOC,
            format!(
                "station {station_id}: non-numeric {} price '{raw}'",
                pending.fuel_type
            ),
        )
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(FeedError::malformed(
            DOC,
            format!(
                "station {station_id}: invalid {} price {amount}",
                pending.fuel_type
            ),
        ));
    }
    Ok(PriceEntry {
        fuel_type: pending.fuel_type,
        amount,
    })
}

/// Parse the station price document into entries keyed by station id.
///
/// Each `<place place_id="..">` holds zero or more
/// `<gas_price type="..">amount</gas_price>` children. Fuel types are
/// normalized here. A place listed more than once accumulates entries in
/// document order; when a fuel type repeats, the join keeps the last one.
///
/// # Errors
///
/// - [`FeedError::Xml`] if the document is not well-formed XML.
/// - [`FeedError::Malformed`] if a place lacks an id, a price lacks a type,
///   or an amount is missing, non-numeric, negative, or not finite.
pub fn parse_prices(xml: &str) -> Result<PriceIndex, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut index = PriceIndex::new();
    let mut place: Option<String> = None;
    let mut pending: Option<PendingPrice> = None;
    let mut entries = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"place" => {
                    let id = place_id(&e, DOC)?;
                    index.entry(id.clone()).or_default();
                    place = Some(id);
                }
                b"gas_price" => pending = Some(open_price(&e, place.as_ref())?),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"place" => {
                    index.entry(place_id(&e, DOC)?).or_default();
                }
                b"gas_price" => {
                    let price = open_price(&e, place.as_ref())?;
                    let id = place.as_deref().unwrap_or_default();
                    return Err(FeedError::malformed(
                        DOC,
                        format!("station {id}: empty {} price", price.fuel_type),
                    ));
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Some(price) = pending.as_mut() {
                    price.raw.push_str(&text(&e, DOC)?);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(price) = pending.as_mut() {
                    price.raw.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"gas_price" => {
                    if let (Some(price), Some(id)) = (pending.take(), place.as_ref()) {
                        let entry = close_price(id, price)?;
                        index.entry(id.clone()).or_default().push(entry);
                        entries += 1;
                    }
                }
                b"place" => place = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(error) => return Err(FeedError::Xml { document: DOC, error }),
            _ => {}
        }
    }

    tracing::debug!(stations = index.len(), entries, "parsed station prices");
    Ok(index)
}
