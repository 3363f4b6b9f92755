use crate::problem::{km::Km, stop::StopIdx};

/// The visiting order assigned to one group, with its metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    stops: Vec<StopIdx>,
    distance: Km,
    estimated_minutes: f64,
    converged: bool,
}

impl Route {
    pub fn new(stops: Vec<StopIdx>, distance: Km, estimated_minutes: f64, converged: bool) -> Self {
        Self {
            stops,
            distance,
            estimated_minutes,
            converged,
        }
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    /// Stops paired with their 1-based position in the route.
    pub fn sequenced_stops(&self) -> impl Iterator<Item = (usize, StopIdx)> + '_ {
        self.stops
            .iter()
            .enumerate()
            .map(|(position, &stop_id)| (position + 1, stop_id))
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn distance(&self) -> Km {
        self.distance
    }

    pub fn estimated_minutes(&self) -> f64 {
        self.estimated_minutes
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizationResult {
    routes: Vec<Route>,
    total_distance: Km,
    total_estimated_minutes: f64,
}

impl OptimizationResult {
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let total_distance = routes.iter().map(Route::distance).sum();
        let total_estimated_minutes = routes.iter().map(Route::estimated_minutes).sum();

        Self {
            routes,
            total_distance,
            total_estimated_minutes,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn total_distance(&self) -> Km {
        self.total_distance
    }

    pub fn total_estimated_minutes(&self) -> f64 {
        self.total_estimated_minutes
    }

    /// Whether the local search of every route reached a local optimum.
    pub fn converged(&self) -> bool {
        self.routes.iter().all(Route::converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_sum_routes() {
        let result = OptimizationResult::from_routes(vec![
            Route::new(vec![StopIdx::new(0), StopIdx::new(2)], Km::new(3.0), 16.0, true),
            Route::new(vec![StopIdx::new(1)], Km::ZERO, 5.0, false),
        ]);

        assert_eq!(result.total_distance(), Km::new(3.0));
        assert_eq!(result.total_estimated_minutes(), 21.0);
        assert!(!result.converged());
    }

    #[test]
    fn test_sequence_is_one_based() {
        let route = Route::new(vec![StopIdx::new(4), StopIdx::new(1)], Km::ZERO, 0.0, true);

        assert_eq!(
            route.sequenced_stops().collect::<Vec<_>>(),
            vec![(1, StopIdx::new(4)), (2, StopIdx::new(1))]
        );
    }
}
