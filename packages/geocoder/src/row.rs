//! Geocoding a single raw address into an output row.

use geo::Point;
use maptools_address::{ParsedAddress, SuffixTable, parse_address};

use crate::{GeocodeError, GeocodeOptions, GeocodeQuery, Geocoder};

/// Which columns to fill on a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDetail {
    /// Only [`GeocodedRow::geometry`].
    Point,
    /// Geometry plus latitude, longitude, lookup and full address.
    Full,
}

/// How a row was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The geocoder returned an acceptable coordinate.
    Matched,
    /// The raw address does not have the `STREET, CITY, STATE ZIP` shape.
    Unparseable,
    /// The geocoder had no match, or the match was outside the view box.
    NoMatch,
    /// The geocoder failed or timed out.
    Failed,
}

/// One geocoded output row.
///
/// Everything except `input` and `outcome` is `None` unless the address
/// was matched (`parsed` is also kept for misses and failures).
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedRow {
    /// The raw input address.
    pub input: String,
    /// The parsed address, if parsing succeeded.
    pub parsed: Option<ParsedAddress>,
    /// How the row was resolved.
    pub outcome: RowOutcome,
    /// `(longitude, latitude)` of the match.
    pub geometry: Option<Point<f64>>,
    /// Latitude of the match ([`RowDetail::Full`] only).
    pub lat: Option<f64>,
    /// Longitude of the match ([`RowDetail::Full`] only).
    pub lon: Option<f64>,
    /// The lookup string sent to the geocoder ([`RowDetail::Full`] only).
    pub lookup_address: Option<String>,
    /// Two-line address including the unit ([`RowDetail::Full`] only).
    pub full_address: Option<String>,
}

impl GeocodedRow {
    fn unmatched(input: &str, parsed: Option<ParsedAddress>, outcome: RowOutcome) -> Self {
        Self {
            input: input.to_string(),
            parsed,
            outcome,
            geometry: None,
            lat: None,
            lon: None,
            lookup_address: None,
            full_address: None,
        }
    }

    fn matched(input: &str, parsed: ParsedAddress, point: Point<f64>, detail: RowDetail) -> Self {
        let mut row = Self::unmatched(input, None, RowOutcome::Matched);
        row.geometry = Some(point);

        if detail == RowDetail::Full {
            row.lat = Some(point.y());
            row.lon = Some(point.x());
            row.lookup_address = Some(parsed.lookup.clone());
            row.full_address = Some(parsed.full_address());
        }

        row.parsed = Some(parsed);
        row
    }

    /// Returns `true` if the row has a geometry.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.geometry.is_some()
    }
}

/// Parses `raw`, geocodes its lookup string and maps the result onto a row.
///
/// Never returns an error: parse failures, misses, out-of-bounds matches,
/// geocoder errors and timeouts are logged and produce a row without a
/// geometry.
pub async fn geocode_address<G: Geocoder + ?Sized>(
    geocoder: &G,
    table: &SuffixTable,
    raw: &str,
    options: &GeocodeOptions,
    detail: RowDetail,
) -> GeocodedRow {
    let parsed = match parse_address(table, raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Invalid address {raw:?}: {e}");
            return GeocodedRow::unmatched(raw, None, RowOutcome::Unparseable);
        }
    };

    let query = GeocodeQuery::from(&parsed);
    let result = tokio::time::timeout(options.timeout, geocoder.geocode(&query, options))
        .await
        .unwrap_or_else(|_| {
            Err(GeocodeError::Timeout {
                timeout: options.timeout,
            })
        });

    match result {
        Ok(Some(hit)) => {
            let point = hit.point();
            if options.accepts(&point) {
                GeocodedRow::matched(raw, parsed, point, detail)
            } else {
                log::warn!(
                    "Match for {} at ({}, {}) is outside the view box",
                    parsed.lookup,
                    hit.longitude,
                    hit.latitude
                );
                GeocodedRow::unmatched(raw, Some(parsed), RowOutcome::NoMatch)
            }
        }
        Ok(None) => {
            log::warn!("Failed to geocode: {}\n         original: {raw}", parsed.lookup);
            GeocodedRow::unmatched(raw, Some(parsed), RowOutcome::NoMatch)
        }
        Err(e) => {
            log::warn!("Geocoder error for {}: {e}", parsed.lookup);
            GeocodedRow::unmatched(raw, Some(parsed), RowOutcome::Failed)
        }
    }
}
