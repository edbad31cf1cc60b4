//! Single-line address parsing.
//!
//! Splits `"STREET[, UNIT...], CITY, STATE ZIP"` into components, tags the
//! USPS street suffix, and rewrites numbered street names into ordinal form
//! (`"W 22 ST"` → `"W 22ND ST"`).
//!
//! Casing: the street line is ASCII upper-cased with whitespace collapsed.
//! Unit, city, state and ZIP keep their input casing and are only trimmed.

use std::sync::{Arc, LazyLock};

use maptools_address_models::{AddressField, AddressParseError, ParsedAddress};
use regex::Regex;

use crate::ordinal::ordinal_suffix_for_digits;
use crate::suffix::SuffixTable;

/// Trailing house or street number on the street-name body.
static TRAILING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+$").expect("valid regex"));

/// Segment separator. Commas without a following space do not split.
const SEGMENT_SEPARATOR: &str = ", ";

/// Suffix after which a trailing number is never rewritten ("1 BROADWAY").
const NO_ORDINAL_SUFFIX: &str = "BROADWAY";

/// Trims a street and collapses internal runs of whitespace to one space.
#[must_use]
pub fn normalize_street(street: &str) -> String {
    street.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a single-line address.
///
/// The input must have the shape `STREET, CITY, STATE ZIP`, separated by
/// `", "`. Any segments between the street and the city are treated as
/// unit information, as is any text following the street suffix:
///
/// - `"179 Livingston St, 7th Fl, Brooklyn, NY 11201"` has unit `"7th Fl"`
/// - `"10 Main St Apt 4, Albany, NY 12207"` has unit `"Apt 4"`
///
/// An unrecognized suffix is not an error: the whole street is kept and
/// [`ParsedAddress::suffix`] is empty.
///
/// # Errors
///
/// * [`AddressParseError::MissingSegments`] if there are fewer than three
///   segments
/// * [`AddressParseError::MalformedStateZip`] if the last segment is not
///   exactly two whitespace-separated tokens
/// * [`AddressParseError::EmptyField`] if the street or city is blank
pub fn parse_address(
    table: &SuffixTable,
    raw: &str,
) -> Result<ParsedAddress, AddressParseError> {
    let segments: Vec<&str> = raw.split(SEGMENT_SEPARATOR).collect();
    let [street_segment, middle @ .., city, state_zip] = segments.as_slice() else {
        return Err(AddressParseError::MissingSegments {
            found: segments.len(),
        });
    };

    let state_zip = state_zip.trim();
    let mut tokens = state_zip.split_whitespace();
    let (Some(state), Some(zip), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(AddressParseError::MalformedStateZip {
            segment: state_zip.to_string(),
        });
    };

    let city = city.trim();
    if city.is_empty() {
        return Err(AddressParseError::EmptyField {
            field: AddressField::City,
        });
    }

    let street = normalize_street(street_segment);
    // ASCII upper-casing keeps byte offsets aligned with `street`.
    let upper = street.to_ascii_uppercase();

    let suffix_match = table.resolve(&upper);
    let (body, suffix, remainder) = match &suffix_match {
        Some(m) => (
            upper[..m.index].trim(),
            m.suffix.as_str(),
            street[m.end()..].trim_start_matches(['.', ',', ' ']),
        ),
        None => (upper.as_str(), "", ""),
    };

    let street = canonical_street(body, suffix);
    if street.is_empty() {
        return Err(AddressParseError::EmptyField {
            field: AddressField::Street,
        });
    }

    let unit_parts: Vec<&str> = std::iter::once(remainder.trim())
        .chain(middle.iter().map(|s| s.trim()))
        .filter(|s| !s.is_empty())
        .collect();
    let unit = (!unit_parts.is_empty()).then(|| unit_parts.join(SEGMENT_SEPARATOR));

    let lookup = format!("{street}, {city}, {state} {zip}");

    Ok(ParsedAddress {
        lookup,
        street,
        suffix: suffix.to_string(),
        unit,
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
    })
}

/// Joins the street-name body and suffix, appending an ordinal to a
/// trailing number on the body.
fn canonical_street(body: &str, suffix: &str) -> String {
    let mut body = body.to_string();

    if suffix != NO_ORDINAL_SUFFIX {
        let ordinal = TRAILING_DIGITS_RE
            .find(&body)
            .map(|digits| ordinal_suffix_for_digits(digits.as_str()));
        if let Some(ordinal) = ordinal {
            body.push_str(&ordinal.to_ascii_uppercase());
        }
    }

    format!("{body} {suffix}").trim().to_string()
}

/// Address parser bound to a shared suffix table.
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone)]
pub struct AddressParser {
    table: Arc<SuffixTable>,
}

impl AddressParser {
    /// Creates a parser over `table`.
    #[must_use]
    pub const fn new(table: Arc<SuffixTable>) -> Self {
        Self { table }
    }

    /// Creates a parser over the standard USPS suffix table.
    #[must_use]
    pub fn usps() -> Self {
        Self::new(Arc::new(SuffixTable::usps()))
    }

    /// The suffix table this parser resolves against.
    #[must_use]
    pub fn table(&self) -> &SuffixTable {
        &self.table
    }

    /// Parses a single-line address. See [`parse_address`].
    ///
    /// # Errors
    ///
    /// Returns [`AddressParseError`] if the address does not have the
    /// `STREET, CITY, STATE ZIP` shape.
    pub fn parse(&self, raw: &str) -> Result<ParsedAddress, AddressParseError> {
        parse_address(&self.table, raw)
    }
}
