use fuelmap_core::{Coordinate, StationLocation};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{place_id, text};
use crate::error::FeedError;
use crate::source::DatasetKind;

const DOC: DatasetKind = DatasetKind::Locations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    CreId,
    X,
    Y,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Field::Name),
            b"cre_id" => Some(Field::CreId),
            b"x" => Some(Field::X),
            b"y" => Some(Field::Y),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct PlaceBuilder {
    id: String,
    name: Option<String>,
    cre_id: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

impl PlaceBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::CreId => &mut self.cre_id,
            Field::X => &mut self.x,
            Field::Y => &mut self.y,
        }
    }

    fn push_text(&mut self, field: Field, chunk: &str) {
        self.slot(field).get_or_insert_with(String::new).push_str(chunk);
    }

    fn finish(self) -> Result<StationLocation, FeedError> {
        let id = self.id;
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| FeedError::malformed(DOC, format!("station {id}: missing <name>")))?;

        let longitude = parse_component(&id, "x", self.x.as_deref())?;
        let latitude = parse_component(&id, "y", self.y.as_deref())?;
        let coordinate = Coordinate::new(latitude, longitude).map_err(|_| {
            FeedError::malformed(
                DOC,
                format!("station {id}: coordinate out of range (lat {latitude}, lon {longitude})"),
            )
        })?;

        Ok(StationLocation {
            id,
            name,
            regulatory_id: self.cre_id.map(|c| c.trim().to_string()).unwrap_or_default(),
            coordinate,
        })
    }
}

fn parse_component(id: &str, tag: &str, raw: Option<&str>) -> Result<f64, FeedError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FeedError::malformed(DOC, format!("station {id}: missing <{tag}>")))?;
    raw.parse::<f64>().map_err(|_| {
        FeedError::malformed(DOC, format!("station {id}: non-numeric <{tag}> value '{raw}'"))
    })
}

/// Parse the station location document.
///
/// Expects `<place place_id="..">` elements carrying `<name>`, `<cre_id>`,
/// and a `<location>` with `<x>` (longitude) and `<y>` (latitude).
/// `cre_id` is optional; everything else is required. Records are returned
/// in document order.
///
/// # Errors
///
/// - [`FeedError::Xml`] if the document is not well-formed XML.
/// - [`FeedError::Malformed`] if a place lacks an id, name, or coordinate
///   component, or a coordinate is non-numeric or out of range.
pub fn parse_locations(xml: &str) -> Result<Vec<StationLocation>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locations = Vec::new();
    let mut current: Option<PlaceBuilder> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"place" {
                    current = Some(PlaceBuilder {
                        id: place_id(&e, DOC)?,
                        ..PlaceBuilder::default()
                    });
                    field = None;
                } else if current.is_some() {
                    field = Field::from_tag(e.name().as_ref());
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"place" {
                    let id = place_id(&e, DOC)?;
                    return Err(FeedError::malformed(
                        DOC,
                        format!("station {id}: empty <place> element"),
                    ));
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(place), Some(f)) = (current.as_mut(), field) {
                    place.push_text(f, &text(&e, DOC)?);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(place), Some(f)) = (current.as_mut(), field) {
                    place.push_text(f, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"place" {
                    if let Some(place) = current.take() {
                        locations.push(place.finish()?);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(error) => return Err(FeedError::Xml { document: DOC, error }),
            _ => {}
        }
    }

    tracing::debug!(count = locations.len(), "parsed station locations");
    Ok(locations)
}
