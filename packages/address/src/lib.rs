#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US postal address normalizer.
//!
//! Turns a loosely formatted single-line address such as
//! `"179 Livingston St, 7th Fl, Brooklyn, NY 11201"` into canonical
//! components suitable for a geocoder query:
//!
//! 1. **Suffix resolution** ([`suffix`]): finds the USPS street suffix
//!    (`ST`, `AVE`, `TERRACE PLACE`, ...) using a ranked table, longest
//!    entries first.
//! 2. **Parsing** ([`parse`]): splits street, unit, city, state and ZIP,
//!    strips the unit from the street, and rewrites numbered streets into
//!    ordinal form via [`ordinal`] (`"W 22 ST"` → `"W 22ND ST"`).
//!
//! Everything here is pure and synchronous. The [`SuffixTable`] is built
//! once and shared by reference; it is `Send + Sync` and needs no locking.

pub mod ordinal;
pub mod parse;
pub mod suffix;

pub use maptools_address_models::{
    AddressField, AddressParseError, BatchConfig, ParsedAddress, SuffixMatch,
};
pub use parse::{AddressParser, parse_address};
pub use suffix::{SuffixTable, resolve_suffix, street_type};
