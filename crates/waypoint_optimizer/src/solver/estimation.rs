use crate::problem::{config::OptimizationConfig, km::Km};

/// Driving time at the configured average speed plus the handling time of
/// every stop.
pub fn estimated_minutes(distance: Km, stop_count: usize, config: &OptimizationConfig) -> f64 {
    if stop_count == 0 {
        return 0.0;
    }

    distance.travel_minutes(config.average_speed) + config.per_stop_minutes * stop_count as f64
}
