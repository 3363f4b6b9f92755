use tracing::debug;

use crate::{
    problem::{km::Km, request::OptimizationRequest, stop::StopIdx},
    solver::{
        construction::nearest_neighbor, deadline::Deadline, distances::GroupDistances,
        two_opt::two_opt,
    },
};

/// Visiting order of one group.
#[derive(Debug, Clone)]
pub struct SequencedGroup {
    pub stops: Vec<StopIdx>,
    pub distance: Km,
    /// Length of the nearest neighbor path before local search.
    pub construction_distance: Km,
    pub converged: bool,
}

/// Orders the stops of `group` by nearest neighbor construction followed by
/// 2-opt improvement. The first stop of `group` always stays first.
pub fn sequence_group(
    request: &OptimizationRequest,
    group: &[StopIdx],
    deadline: &Deadline,
) -> SequencedGroup {
    let distances = GroupDistances::new(
        group
            .iter()
            .map(|&stop_id| request.coordinates(stop_id))
            .collect(),
    );

    let mut path = nearest_neighbor(&distances);
    let construction_distance = distances.path_distance(&path);

    let outcome = two_opt(
        &mut path,
        &distances,
        request.config().two_opt_iterations(group.len()),
        deadline,
    );
    let distance = distances.path_distance(&path);

    debug!(
        stops = group.len(),
        construction_km = construction_distance.value(),
        improved_km = distance.value(),
        evaluations = outcome.evaluations,
        improvements = outcome.improvements,
        converged = outcome.converged,
        "group sequenced"
    );

    SequencedGroup {
        stops: path.into_iter().map(|position| group[position]).collect(),
        distance,
        construction_distance,
        converged: outcome.converged,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{problem::config::OptimizationConfig, test_utils};

    fn all_stops(request: &OptimizationRequest) -> Vec<StopIdx> {
        StopIdx::all(request.len()).collect()
    }

    #[test]
    fn test_square_is_traversed_along_its_perimeter() {
        let request = test_utils::create_request(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)], 1);

        let sequenced = sequence_group(
            &request,
            &all_stops(&request),
            &Deadline::start(Duration::from_secs(60)),
        );

        let order = sequenced.stops.iter().map(|s| s.get()).collect::<Vec<_>>();
        assert_eq!(order, vec![0, 2, 1, 3]);
        assert!(sequenced.converged);
        assert!(sequenced.distance <= sequenced.construction_distance);
    }

    #[test]
    fn test_group_positions_map_back_to_stops() {
        let request = test_utils::create_request(
            &[(0.0, 0.0), (9.0, 9.0), (0.0, 0.2), (9.0, 9.1), (0.0, 0.1)],
            1,
        );
        let group = vec![StopIdx::new(0), StopIdx::new(2), StopIdx::new(4)];

        let sequenced = sequence_group(&request, &group, &Deadline::start(Duration::from_secs(60)));

        assert_eq!(
            sequenced.stops,
            vec![StopIdx::new(0), StopIdx::new(4), StopIdx::new(2)]
        );
    }

    #[test]
    fn test_expired_deadline_keeps_construction() {
        let coordinates = test_utils::create_scattered_locations(30, (50.85, 4.35), 0.2);
        let request = test_utils::create_request_with_config(
            &coordinates,
            1,
            OptimizationConfig {
                time_budget: Duration::ZERO,
                ..OptimizationConfig::default()
            },
        );

        let sequenced = sequence_group(
            &request,
            &all_stops(&request),
            &Deadline::start(Duration::ZERO),
        );

        assert!(!sequenced.converged);
        assert_eq!(sequenced.distance, sequenced.construction_distance);
        assert_eq!(sequenced.stops.len(), 30);
    }
}
