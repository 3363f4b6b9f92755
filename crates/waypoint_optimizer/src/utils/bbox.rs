use crate::problem::location::Coordinates;

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    min: Coordinates,
    max: Coordinates,
}

impl BBox {
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;

        let mut bbox = BBox {
            min: first,
            max: first,
        };
        for coordinates in iter {
            bbox.extend(coordinates);
        }

        Some(bbox)
    }

    pub fn extend(&mut self, coordinates: Coordinates) {
        self.min = Coordinates::new(
            self.min.lat().min(coordinates.lat()),
            self.min.lon().min(coordinates.lon()),
        );
        self.max = Coordinates::new(
            self.max.lat().max(coordinates.lat()),
            self.max.lon().max(coordinates.lon()),
        );
    }

    pub fn min(&self) -> Coordinates {
        self.min
    }

    pub fn max(&self) -> Coordinates {
        self.max
    }

    pub fn center(&self) -> Coordinates {
        let (min, max) = (self.min(), self.max());
        Coordinates::new((min.lat() + max.lat()) / 2.0, (min.lon() + max.lon()) / 2.0)
    }

    /// `count` points evenly spaced along the longest side of the box, through
    /// its center. Each anchor sits in the middle of its slice so that the
    /// first and last anchors are not pinned to the box edges.
    pub fn anchors(&self, count: usize) -> Vec<Coordinates> {
        let (min, max, center) = (self.min(), self.max(), self.center());
        let lat_span = max.lat() - min.lat();
        let lon_span = max.lon() - min.lon();

        (0..count)
            .map(|k| {
                let t = (k as f64 + 0.5) / count as f64;
                if lat_span >= lon_span {
                    Coordinates::new(min.lat() + lat_span * t, center.lon())
                } else {
                    Coordinates::new(center.lat(), min.lon() + lon_span * t)
                }
            })
            .collect()
    }
}
