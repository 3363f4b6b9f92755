use std::time::Duration;

use crate::{error::ValidationError, problem::kmh::Kmh};

pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;
pub const DEFAULT_PER_STOP_MINUTES: f64 = 5.0;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2000;

const MIN_DEFAULT_ITERATIONS: usize = 10_000;
const ITERATIONS_PER_STOP_PAIR: usize = 25;
const MAX_CLUSTERING_ROUNDS: usize = 100;

/// Tuning knobs of a single optimization request.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationConfig {
    pub average_speed: Kmh,
    pub per_stop_minutes: f64,
    /// Upper bound on 2-opt edge pair evaluations per group. `None` derives the
    /// bound from the group size.
    pub max_iterations: Option<usize>,
    pub time_budget: Duration,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            average_speed: Kmh::new(DEFAULT_AVERAGE_SPEED_KMH),
            per_stop_minutes: DEFAULT_PER_STOP_MINUTES,
            max_iterations: None,
            time_budget: Duration::from_millis(DEFAULT_TIME_BUDGET_MS),
        }
    }
}

impl OptimizationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let speed = self.average_speed.value();
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ValidationError::InvalidConfig {
                field: "averageSpeedKmh",
                message: format!("must be a finite number greater than 0, got {speed}"),
            });
        }

        if !self.per_stop_minutes.is_finite() || self.per_stop_minutes < 0.0 {
            return Err(ValidationError::InvalidConfig {
                field: "perStopMinutes",
                message: format!(
                    "must be a finite number of at least 0, got {}",
                    self.per_stop_minutes
                ),
            });
        }

        Ok(())
    }

    pub fn two_opt_iterations(&self, group_len: usize) -> usize {
        self.max_iterations.unwrap_or_else(|| {
            group_len
                .saturating_mul(group_len)
                .saturating_mul(ITERATIONS_PER_STOP_PAIR)
                .max(MIN_DEFAULT_ITERATIONS)
        })
    }

    pub fn clustering_rounds(&self) -> usize {
        self.max_iterations
            .map_or(MAX_CLUSTERING_ROUNDS, |max| max.min(MAX_CLUSTERING_ROUNDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_iterations_scale_with_group() {
        let config = OptimizationConfig::default();

        assert_eq!(config.two_opt_iterations(3), 10_000);
        assert_eq!(config.two_opt_iterations(100), 250_000);
        assert_eq!(config.clustering_rounds(), 100);
    }

    #[test]
    fn test_explicit_iterations() {
        let config = OptimizationConfig {
            max_iterations: Some(12),
            ..OptimizationConfig::default()
        };

        assert_eq!(config.two_opt_iterations(100), 12);
        assert_eq!(config.clustering_rounds(), 12);
    }

    #[test]
    fn test_validate() {
        assert!(OptimizationConfig::default().validate().is_ok());

        let config = OptimizationConfig {
            average_speed: Kmh::new(0.0),
            ..OptimizationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfig {
                field: "averageSpeedKmh",
                ..
            })
        ));

        let config = OptimizationConfig {
            per_stop_minutes: -1.0,
            ..OptimizationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfig {
                field: "perStopMinutes",
                ..
            })
        ));
    }
}
