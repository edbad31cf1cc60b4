//! Geocoder request types built from parsed addresses.

use std::time::Duration;

use geo::{Intersects, Point, Rect, coord};
use maptools_address::ParsedAddress;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// A structured geocoding query.
///
/// Services that accept free-form input should use [`Self::lookup`];
/// structured services can use the individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    /// One-line `"street, city, state zip"` string, without the unit.
    pub lookup: String,
    /// Canonical street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// ZIP code.
    pub postalcode: String,
}

impl From<&ParsedAddress> for GeocodeQuery {
    fn from(addr: &ParsedAddress) -> Self {
        Self {
            lookup: addr.lookup.clone(),
            street: addr.street.clone(),
            city: addr.city.clone(),
            state: addr.state.clone(),
            postalcode: addr.zip.clone(),
        }
    }
}

/// A longitude/latitude bounding box used to restrict results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    rect: Rect<f64>,
}

impl ViewBox {
    /// Creates a view box from two opposite corners, each given as
    /// `(longitude, latitude)`. Corner order does not matter.
    #[must_use]
    pub fn new(corner_a: (f64, f64), corner_b: (f64, f64)) -> Self {
        Self {
            rect: Rect::new(
                coord! { x: corner_a.0, y: corner_a.1 },
                coord! { x: corner_b.0, y: corner_b.1 },
            ),
        }
    }

    /// Western, southern, eastern and northern edges.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (min, max) = (self.rect.min(), self.rect.max());
        (min.x, min.y, max.x, max.y)
    }

    /// Returns `true` if `point` lies inside the box or on its edge.
    #[must_use]
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.rect.intersects(&point.0)
    }
}

/// Per-request geocoding options.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeOptions {
    /// Maximum time to wait for a single request.
    pub timeout: Duration,
    /// Preferred search area.
    pub viewbox: Option<ViewBox>,
    /// Reject results outside [`Self::viewbox`].
    pub bounded: bool,
}

impl Default for GeocodeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            viewbox: None,
            bounded: false,
        }
    }
}

impl GeocodeOptions {
    /// Restricts results to `viewbox`.
    #[must_use]
    pub fn bounded_to(mut self, viewbox: ViewBox) -> Self {
        self.viewbox = Some(viewbox);
        self.bounded = true;
        self
    }

    /// Returns `true` if `point` is acceptable under these options.
    #[must_use]
    pub fn accepts(&self, point: &Point<f64>) -> bool {
        match (self.bounded, &self.viewbox) {
            (true, Some(viewbox)) => viewbox.contains(point),
            _ => true,
        }
    }
}
