use fxhash::FxHashSet;

use crate::{
    error::ValidationError,
    problem::{
        config::OptimizationConfig,
        location::Coordinates,
        stop::{Stop, StopIdx},
    },
};

/// A validated optimization request. Holding one guarantees that every stop
/// has a unique non-empty id and real coordinates, that `group_count >= 1`
/// and that the config values are usable.
#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    stops: Vec<Stop>,
    group_count: usize,
    config: OptimizationConfig,
}

impl OptimizationRequest {
    pub fn new(
        stops: Vec<Stop>,
        group_count: usize,
        config: OptimizationConfig,
    ) -> Result<Self, ValidationError> {
        if group_count == 0 {
            return Err(ValidationError::InvalidGroupCount(0));
        }

        config.validate()?;

        let mut seen_ids = FxHashSet::default();
        for (position, stop) in stops.iter().enumerate() {
            if stop.id().is_empty() {
                return Err(ValidationError::EmptyStopId(position));
            }

            let coordinates = stop.coordinates();
            Coordinates::try_new(coordinates.lat(), coordinates.lon()).map_err(|source| {
                ValidationError::Coordinate {
                    stop_id: stop.id().to_owned(),
                    source,
                }
            })?;

            if !seen_ids.insert(stop.id()) {
                return Err(ValidationError::DuplicateStopId(stop.id().to_owned()));
            }
        }

        Ok(Self {
            stops,
            group_count,
            config,
        })
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, stop_id: StopIdx) -> &Stop {
        &self.stops[stop_id]
    }

    pub fn coordinates(&self, stop_id: StopIdx) -> Coordinates {
        self.stops[stop_id].coordinates()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }
}
