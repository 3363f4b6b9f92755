use geo::{Distance, Haversine};

use crate::{error::CoordinateError, problem::km::Km};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    point: geo::Point,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    /// Builds coordinates after checking they describe a real place.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }

        Ok(Self::new(lat, lon))
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    fn canonical_key(&self) -> (u64, u64) {
        (self.lat().to_bits(), self.lon().to_bits())
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        coordinates.point
    }
}

/// Great-circle distance between `a` and `b`.
///
/// The operands are put in a canonical order before evaluating the haversine
/// formula so that `distance_km(a, b)` and `distance_km(b, a)` are bit for bit
/// identical.
pub fn distance_km(a: Coordinates, b: Coordinates) -> Km {
    if a == b {
        return Km::ZERO;
    }

    let (from, to) = if a.canonical_key() <= b.canonical_key() {
        (a, b)
    } else {
        (b, a)
    };

    Km::new(Haversine.distance(from.point, to.point) / 1000.0)
}

/// Arithmetic mean of the latitudes and longitudes. Good enough for stops
/// within a city, not meant for points spread across the antimeridian.
pub fn centroid<I>(coordinates: I) -> Option<Coordinates>
where
    I: IntoIterator<Item = Coordinates>,
{
    let (count, lat_sum, lon_sum) = coordinates.into_iter().fold(
        (0usize, 0.0, 0.0),
        |(count, lat_sum, lon_sum), coordinates| {
            (
                count + 1,
                lat_sum + coordinates.lat(),
                lon_sum + coordinates.lon(),
            )
        },
    );

    if count == 0 {
        return None;
    }

    Some(Coordinates::new(
        lat_sum / count as f64,
        lon_sum / count as f64,
    ))
}
