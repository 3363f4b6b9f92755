use crate::solver::distances::GroupDistances;

/// Nearest neighbor construction. Starts from the first stop of the group and
/// keeps appending the closest unvisited stop to the end of the path. Ties go
/// to the stop that comes first in the group.
pub fn nearest_neighbor(distances: &GroupDistances) -> Vec<usize> {
    let len = distances.len();
    if len == 0 {
        return vec![];
    }

    let mut visited = vec![false; len];
    let mut path = Vec::with_capacity(len);

    let mut current = 0;
    visited[current] = true;
    path.push(current);

    while path.len() < len {
        let mut nearest: Option<(usize, f64)> = None;

        for candidate in 0..len {
            if visited[candidate] {
                continue;
            }

            let distance = distances.get(current, candidate);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((candidate, distance));
            }
        }

        let Some((next, _)) = nearest else {
            break;
        };

        visited[next] = true;
        path.push(next);
        current = next;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::location::Coordinates;

    fn distances(points: &[(f64, f64)]) -> GroupDistances {
        GroupDistances::new(
            points
                .iter()
                .map(|&(lat, lon)| Coordinates::new(lat, lon))
                .collect(),
        )
    }

    #[test]
    fn test_nearest_neighbor_on_a_line() {
        let path = nearest_neighbor(&distances(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (0.0, 1.0),
            (0.0, 2.0),
        ]));

        assert_eq!(path, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_ties_prefer_input_order() {
        // (0, 1) and (1, 0) are both one degree away from the origin.
        let path = nearest_neighbor(&distances(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));

        assert_eq!(path[1], 1);
    }

    #[test]
    fn test_duplicate_coordinates() {
        let path = nearest_neighbor(&distances(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.0)]));

        assert_eq!(path, vec![0, 2, 1]);
    }

    #[test]
    fn test_degenerate_groups() {
        assert!(nearest_neighbor(&distances(&[])).is_empty());
        assert_eq!(nearest_neighbor(&distances(&[(5.0, 5.0)])), vec![0]);
    }
}
