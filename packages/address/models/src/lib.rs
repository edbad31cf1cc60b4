#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the US postal address normalizer.
//!
//! This crate contains only data types, configuration structs, and error
//! values. It has no heavyweight dependencies (no regex, no I/O).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single-line address split into canonical components.
///
/// Values are only ever constructed fully populated: `street`, `city`,
/// `state`, `zip` and `lookup` are non-empty. A failed parse is an
/// [`AddressParseError`], never a partially filled `ParsedAddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// One-line `"street, city, state zip"` query string, without the unit.
    pub lookup: String,
    /// Canonical street line, e.g. `"W 22ND ST"`. Never includes the unit.
    pub street: String,
    /// Matched USPS street suffix, or an empty string if none was found.
    pub suffix: String,
    /// Apartment, floor or suite fragment, e.g. `"7th Fl"`.
    pub unit: Option<String>,
    /// City, trimmed but otherwise verbatim.
    pub city: String,
    /// State, trimmed but otherwise verbatim.
    pub state: String,
    /// ZIP code, trimmed but otherwise verbatim.
    pub zip: String,
}

impl ParsedAddress {
    /// Returns `true` if no USPS suffix was recognized in the street.
    #[must_use]
    pub fn is_missing_suffix(&self) -> bool {
        self.suffix.is_empty()
    }

    /// Formats the two-line mailing address, including the unit if any.
    ///
    /// ```text
    /// 179 LIVINGSTON ST 7th Fl
    /// Brooklyn, NY 11201
    /// ```
    #[must_use]
    pub fn full_address(&self) -> String {
        let unit = self
            .unit
            .as_deref()
            .map_or_else(String::new, |u| format!(" {u}"));
        format!(
            "{}{unit}\n{}, {} {}",
            self.street, self.city, self.state, self.zip
        )
    }
}

/// A street suffix located within a normalized street fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixMatch {
    /// The table entry that matched, e.g. `"ST"` or `"TERRACE PLACE"`.
    pub suffix: String,
    /// Byte offset of the match within the fragment.
    pub index: usize,
}

impl SuffixMatch {
    /// Byte offset just past the end of the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.index + self.suffix.len()
    }
}

/// A required component of a [`ParsedAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    /// Street line.
    Street,
    /// City.
    City,
    /// State.
    State,
    /// ZIP code.
    Zip,
}

impl AddressField {
    /// Lowercase field name, matching the serialized [`ParsedAddress`] keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an address does not have the `STREET, CITY, STATE ZIP` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Fewer than three `", "`-separated segments.
    #[error("Expected at least 3 comma-separated segments, found {found}")]
    MissingSegments {
        /// Number of segments found.
        found: usize,
    },

    /// The final segment is not exactly `STATE ZIP`.
    #[error("Expected \"STATE ZIP\" in final segment, found {segment:?}")]
    MalformedStateZip {
        /// The offending segment, trimmed.
        segment: String,
    },

    /// A required component is empty after trimming.
    #[error("Address has an empty {field}")]
    EmptyField {
        /// Which component was empty.
        field: AddressField,
    },
}

/// Configuration for CSV batch address normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Name of the CSV column holding the raw address.
    #[serde(default = "default_address_column")]
    pub address_column: String,

    /// CSV field delimiter. Must be a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_address_column() -> String {
    "address".to_string()
}

const fn default_delimiter() -> char {
    ','
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            address_column: default_address_column(),
            delimiter: default_delimiter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn livingston() -> ParsedAddress {
        ParsedAddress {
            lookup: "179 LIVINGSTON ST, Brooklyn, NY 11201".to_string(),
            street: "179 LIVINGSTON ST".to_string(),
            suffix: "ST".to_string(),
            unit: Some("7th Fl".to_string()),
            city: "Brooklyn".to_string(),
            state: "NY".to_string(),
            zip: "11201".to_string(),
        }
    }

    #[test]
    fn full_address_includes_unit() {
        assert_eq!(
            livingston().full_address(),
            "179 LIVINGSTON ST 7th Fl\nBrooklyn, NY 11201"
        );
    }

    #[test]
    fn full_address_without_unit() {
        let addr = ParsedAddress {
            unit: None,
            ..livingston()
        };
        assert_eq!(addr.full_address(), "179 LIVINGSTON ST\nBrooklyn, NY 11201");
    }

    #[test]
    fn absent_unit_serializes_as_null() {
        let addr = ParsedAddress {
            unit: None,
            ..livingston()
        };
        let json = serde_json::to_value(&addr).unwrap();
        assert!(json["unit"].is_null());
        assert_eq!(json["suffix"], "ST");
    }

    #[test]
    fn suffix_match_end() {
        let m = SuffixMatch {
            suffix: "ST".to_string(),
            index: 5,
        };
        assert_eq!(m.end(), 7);
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            AddressParseError::EmptyField {
                field: AddressField::City
            }
            .to_string(),
            "Address has an empty city"
        );
        assert_eq!(
            AddressParseError::MissingSegments { found: 1 }.to_string(),
            "Expected at least 3 comma-separated segments, found 1"
        );
    }

    #[test]
    fn batch_config_defaults_from_empty_toml() {
        let config: BatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, BatchConfig::default());
        assert_eq!(config.address_column, "address");
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn batch_config_overrides() {
        let config: BatchConfig = toml::from_str(
            r#"
            address_column = "location"
            delimiter = ";"
            "#,
        )
        .unwrap();
        assert_eq!(config.address_column, "location");
        assert_eq!(config.delimiter, ';');
    }
}
