use crate::{define_index_newtype, problem::location::Coordinates};

define_index_newtype!(StopIdx, Stop);

/// A place to visit. The id and address are carried through untouched, only
/// the coordinates take part in the optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    id: String,
    coordinates: Coordinates,
    address: String,
}

impl Stop {
    pub fn new(id: impl Into<String>, coordinates: Coordinates, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinates,
            address: address.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}
