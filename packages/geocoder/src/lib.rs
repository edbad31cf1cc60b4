#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocode adapter for normalized addresses.
//!
//! Sits between [`maptools_address`] and a geocoding service:
//!
//! 1. Parses the raw address and sends its `lookup` string (and structured
//!    street/city/state/postalcode fields) to an injected [`Geocoder`].
//! 2. Maps the result, or its absence, onto a [`row::GeocodedRow`] with a
//!    `(longitude, latitude)` [`geo::Point`].
//!
//! The adapter never fails a row with an error: unparseable addresses,
//! misses, timeouts and service errors all produce a row without a
//! geometry plus a warning, so one bad address never stops a batch
//! ([`batch::geocode_batch`]).
//!
//! Concrete geocoders (Census, Nominatim, Pelias, ...) are provided by the
//! caller; this crate performs no HTTP itself.

pub mod batch;
pub mod progress;
pub mod query;
pub mod row;

use std::time::Duration;

use geo::Point;
use thiserror::Error;

pub use query::{GeocodeOptions, GeocodeQuery, ViewBox};

/// A coordinate returned by a geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The matched/canonical address returned by the geocoder.
    pub matched_address: Option<String>,
}

impl GeocodedPoint {
    /// The location as a `(longitude, latitude)` point.
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request did not complete within [`GeocodeOptions::timeout`].
    #[error("Geocoding timed out after {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The service could not be reached or rejected the request.
    #[error("Geocoder unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// A geocoding capability, injected by the caller.
///
/// Implementations own their transport, retry and rate-limit policy. The
/// adapter additionally bounds each call by [`GeocodeOptions::timeout`].
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a query to a coordinate.
    ///
    /// Returns `Ok(None)` if the service has no match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request fails.
    async fn geocode(
        &self,
        query: &GeocodeQuery,
        options: &GeocodeOptions,
    ) -> Result<Option<GeocodedPoint>, GeocodeError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::{GeocodeError, GeocodeOptions, GeocodeQuery, GeocodedPoint, Geocoder};

    /// In-memory geocoder keyed by `lookup` string.
    #[derive(Default)]
    pub struct FakeGeocoder {
        pub points: BTreeMap<String, (f64, f64)>,
        pub failing: Vec<String>,
        pub seen: Mutex<Vec<GeocodeQuery>>,
    }

    impl FakeGeocoder {
        pub fn with_point(mut self, lookup: &str, longitude: f64, latitude: f64) -> Self {
            self.points.insert(lookup.to_string(), (longitude, latitude));
            self
        }

        pub fn with_failure(mut self, lookup: &str) -> Self {
            self.failing.push(lookup.to_string());
            self
        }
    }

    #[async_trait::async_trait]
    impl Geocoder for FakeGeocoder {
        async fn geocode(
            &self,
            query: &GeocodeQuery,
            _options: &GeocodeOptions,
        ) -> Result<Option<GeocodedPoint>, GeocodeError> {
            self.seen.lock().unwrap().push(query.clone());

            if self.failing.contains(&query.lookup) {
                return Err(GeocodeError::Unavailable {
                    message: "connection refused".to_string(),
                });
            }

            Ok(self
                .points
                .get(&query.lookup)
                .map(|&(longitude, latitude)| GeocodedPoint {
                    latitude,
                    longitude,
                    matched_address: Some(query.lookup.clone()),
                }))
        }
    }
}
