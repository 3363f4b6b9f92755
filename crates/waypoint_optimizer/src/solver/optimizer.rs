use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    cache::{CacheKey, ResultCache},
    error::OptimizeError,
    problem::{request::OptimizationRequest, stop::StopIdx},
    solver::{
        clustering::cluster_stops,
        deadline::Deadline,
        estimation::estimated_minutes,
        optimizer_params::OptimizerParams,
        route::{OptimizationResult, Route},
        sequencing::sequence_group,
    },
    timer_debug,
};

/// Clusters the stops, sequences every group in parallel on the current rayon
/// pool and estimates each route.
///
/// The whole request shares one deadline. A group whose local search runs out
/// of time or iterations keeps its best path and reports `converged = false`.
#[instrument(skip_all, fields(stops = request.len(), groups = request.group_count()))]
pub fn optimize(request: &OptimizationRequest) -> Result<OptimizationResult, OptimizeError> {
    let deadline = Deadline::start(request.config().time_budget);

    let groups = timer_debug!("clustering", cluster_stops(request));

    let routes = timer_debug!(
        "sequencing",
        groups
            .into_par_iter()
            .map(|group| build_route(request, &group, &deadline))
            .collect::<Result<Vec<_>, _>>()
    )?;

    let result = OptimizationResult::from_routes(routes);

    // Finite routes can still add up past f64::MAX.
    if !result.total_distance().is_finite() || !result.total_estimated_minutes().is_finite() {
        return Err(OptimizeError::Internal(format!(
            "totals of {} routes overflowed: distance {:?}, minutes {}",
            result.routes().len(),
            result.total_distance(),
            result.total_estimated_minutes()
        )));
    }

    if result.converged() {
        info!(
            distance_km = result.total_distance().value(),
            estimated_minutes = result.total_estimated_minutes(),
            routes = result.routes().len(),
            "optimization finished"
        );
    } else {
        warn!(
            distance_km = result.total_distance().value(),
            routes = result.routes().len(),
            remaining = ?deadline.remaining(),
            "optimization stopped before convergence"
        );
    }

    Ok(result)
}

fn build_route(
    request: &OptimizationRequest,
    group: &[StopIdx],
    deadline: &Deadline,
) -> Result<Route, OptimizeError> {
    let sequenced = sequence_group(request, group, deadline);

    if !sequenced.distance.is_finite() || sequenced.distance.value() < 0.0 {
        return Err(OptimizeError::Internal(format!(
            "route of {} stops has an invalid length {:?}",
            group.len(),
            sequenced.distance
        )));
    }

    let minutes = estimated_minutes(sequenced.distance, sequenced.stops.len(), request.config());
    if !minutes.is_finite() {
        return Err(OptimizeError::Internal(format!(
            "route of {} stops has an invalid estimated time {minutes}",
            group.len()
        )));
    }

    Ok(Route::new(
        sequenced.stops,
        sequenced.distance,
        minutes,
        sequenced.converged,
    ))
}

/// Long-lived entry point owning its worker pool and, optionally, a result
/// cache shared by every request it serves.
pub struct Optimizer {
    pool: rayon::ThreadPool,
    cache: Option<Arc<dyn ResultCache>>,
}

impl Optimizer {
    pub fn new(params: OptimizerParams) -> Result<Self, OptimizeError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.threads.number_of_threads())
            .thread_name(|index| format!("waypoint-worker-{index}"))
            .build()
            .map_err(|error| OptimizeError::Internal(error.to_string()))?;

        Ok(Self { pool, cache: None })
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, OptimizeError> {
        let Some(cache) = &self.cache else {
            return self.pool.install(|| optimize(request));
        };

        let key = CacheKey::new(request);
        if let Some(result) = cache.get(&key) {
            debug!(stops = request.len(), "serving optimization from cache");
            return Ok(result);
        }

        let result = self.pool.install(|| optimize(request))?;

        // Partial results depend on timing, only local optima are worth reusing.
        if result.converged() {
            cache.insert(key, result.clone());
        }

        Ok(result)
    }

    /// Runs the clustering stage alone.
    pub fn cluster(&self, request: &OptimizationRequest) -> Vec<Vec<StopIdx>> {
        self.pool.install(|| cluster_stops(request))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        cache::BoundedResultCache,
        problem::{config::OptimizationConfig, km::Km},
        solver::optimizer_params::Threads,
        test_utils,
    };

    #[test]
    fn test_empty_request() {
        let request = test_utils::create_request(&[], 1);

        let result = optimize(&request).unwrap();

        assert!(result.routes().is_empty());
        assert_eq!(result.total_distance(), Km::ZERO);
        assert_eq!(result.total_estimated_minutes(), 0.0);
        assert!(result.converged());
    }

    #[test]
    fn test_single_stop() {
        let request = test_utils::create_request(&[(50.0, 4.0)], 1);

        let result = optimize(&request).unwrap();

        assert_eq!(result.routes().len(), 1);
        assert_eq!(result.routes()[0].stops(), &[StopIdx::new(0)]);
        assert_eq!(result.total_distance(), Km::ZERO);
        assert_eq!(result.total_estimated_minutes(), 5.0);
    }

    #[test]
    fn test_overflowing_estimate_is_an_internal_fault() {
        let request = test_utils::create_request_with_config(
            &[(0.0, 0.0), (0.0, 1.0)],
            1,
            OptimizationConfig {
                per_stop_minutes: 1e308,
                ..OptimizationConfig::default()
            },
        );

        let error = optimize(&request).unwrap_err();

        assert_eq!(error.kind(), "InternalFault");
        assert_eq!(error.reason(), "internal_fault");
    }

    #[test]
    fn test_overflowing_totals_are_an_internal_fault() {
        // Each single stop route costs 1e308 minutes, finite on its own.
        let request = test_utils::create_request_with_config(
            &[(0.0, 0.0), (10.0, 10.0)],
            2,
            OptimizationConfig {
                per_stop_minutes: 1e308,
                ..OptimizationConfig::default()
            },
        );

        let error = optimize(&request).unwrap_err();

        assert!(matches!(error, OptimizeError::Internal(_)));
    }

    #[test]
    fn test_routes_follow_group_order() {
        let request = test_utils::create_request(
            &[(50.85, 4.35), (51.22, 4.40), (50.86, 4.36), (51.23, 4.41)],
            2,
        );

        let result = optimize(&request).unwrap();

        assert_eq!(result.routes().len(), 2);
        assert_eq!(result.routes()[0].stops()[0], StopIdx::new(0));
        assert_eq!(result.routes()[1].stops()[0], StopIdx::new(1));
    }

    #[test]
    fn test_optimizer_reuses_cached_result() {
        let cache = Arc::new(BoundedResultCache::new(4));
        let optimizer = Optimizer::new(OptimizerParams {
            threads: Threads::Multi(2),
        })
        .unwrap()
        .with_cache(cache.clone());
        let request = test_utils::create_request(&[(0.0, 0.0), (0.0, 0.2), (0.0, 0.1)], 1);

        let first = optimizer.optimize(&request).unwrap();
        assert_eq!(cache.len(), 1);

        let second = optimizer.optimize(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partial_results_are_not_cached() {
        let cache = Arc::new(BoundedResultCache::new(4));
        let optimizer = Optimizer::new(OptimizerParams {
            threads: Threads::Single,
        })
        .unwrap()
        .with_cache(cache.clone());
        let coordinates = test_utils::create_scattered_locations(20, (0.0, 0.0), 1.0);
        let request = test_utils::create_request_with_config(
            &coordinates,
            1,
            OptimizationConfig {
                time_budget: Duration::ZERO,
                ..OptimizationConfig::default()
            },
        );

        let result = optimizer.optimize(&request).unwrap();

        assert!(!result.converged());
        assert!(cache.is_empty());
    }
}
