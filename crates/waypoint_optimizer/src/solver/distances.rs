use crate::problem::{
    km::Km,
    location::{Coordinates, distance_km},
};

/// Above this many stops a group is not worth an n² table.
const MATRIX_MAX_STOPS: usize = 2048;

/// Pairwise distances between the stops of a single group, addressed by the
/// position of the stop inside the group.
pub enum GroupDistances {
    Matrix { len: usize, values: Vec<f64> },
    Direct { coordinates: Vec<Coordinates> },
}

impl GroupDistances {
    pub fn new(coordinates: Vec<Coordinates>) -> Self {
        let len = coordinates.len();
        if len > MATRIX_MAX_STOPS {
            return GroupDistances::Direct { coordinates };
        }

        let mut values = vec![0.0; len * len];
        for i in 0..len {
            for j in (i + 1)..len {
                let distance = distance_km(coordinates[i], coordinates[j]).value();
                values[i * len + j] = distance;
                values[j * len + i] = distance;
            }
        }

        GroupDistances::Matrix { len, values }
    }

    pub fn len(&self) -> usize {
        match self {
            GroupDistances::Matrix { len, .. } => *len,
            GroupDistances::Direct { coordinates } => coordinates.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        match self {
            GroupDistances::Matrix { len, values } => values[from * len + to],
            GroupDistances::Direct { coordinates } => {
                distance_km(coordinates[from], coordinates[to]).value()
            }
        }
    }

    /// Length of the open path visiting `path` in order.
    pub fn path_distance(&self, path: &[usize]) -> Km {
        path.windows(2)
            .map(|pair| Km::new(self.get(pair[0], pair[1])))
            .sum()
    }
}
