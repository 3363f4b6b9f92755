use tracing::debug;

use crate::{
    problem::{
        location::{Coordinates, centroid, distance_km},
        request::OptimizationRequest,
        stop::StopIdx,
    },
    utils::bbox::BBox,
};

/// Splits the stops of `request` into `request.group_count()` groups.
///
/// - one group: every stop, in input order
/// - at least as many groups as stops: one stop per group
/// - otherwise: k-means over the coordinates
///
/// Groups are never empty, list their stops in input order and are sorted by
/// their first stop.
pub fn cluster_stops(request: &OptimizationRequest) -> Vec<Vec<StopIdx>> {
    let len = request.len();
    let group_count = request.group_count();

    if len == 0 {
        return vec![];
    }

    if group_count <= 1 {
        return vec![StopIdx::all(len).collect()];
    }

    if group_count >= len {
        return StopIdx::all(len).map(|stop_id| vec![stop_id]).collect();
    }

    let coordinates = request
        .stops()
        .iter()
        .map(|stop| stop.coordinates())
        .collect::<Vec<_>>();

    let assignments = k_means(
        &coordinates,
        group_count,
        request.config().clustering_rounds(),
    );

    let mut groups: Vec<Vec<StopIdx>> = vec![vec![]; group_count];
    for (stop_id, &cluster) in StopIdx::all(len).zip(assignments.iter()) {
        groups[cluster].push(stop_id);
    }

    groups.retain(|group| !group.is_empty());
    groups.sort_by_key(|group| group[0]);
    groups
}

/// Deterministic k-means. Returns the cluster of every point, each of the `k`
/// clusters holding at least one point. Expects `2 <= k < points.len()`.
fn k_means(points: &[Coordinates], k: usize, max_rounds: usize) -> Vec<usize> {
    let mut centroids = initial_centroids(points, k);
    let mut assignments = vec![usize::MAX; points.len()];
    let mut rounds = 0;

    while rounds < max_rounds.max(1) {
        rounds += 1;

        let mut changed = false;
        for (point_index, &point) in points.iter().enumerate() {
            let cluster = nearest_centroid(&centroids, point);
            if assignments[point_index] != cluster {
                assignments[point_index] = cluster;
                changed = true;
            }
        }

        if !changed {
            break;
        }

        update_centroids(points, &assignments, &mut centroids);
    }

    fill_empty_clusters(points, &mut assignments, &mut centroids);

    debug!(points = points.len(), k, rounds, "k-means finished");

    assignments
}

/// Picks, for each of `k` anchors spread over the bounding box, the closest
/// point not already picked.
fn initial_centroids(points: &[Coordinates], k: usize) -> Vec<Coordinates> {
    let Some(bbox) = BBox::from_coordinates(points.iter().copied()) else {
        return vec![];
    };

    let mut taken = vec![false; points.len()];
    let mut centroids = Vec::with_capacity(k);

    for anchor in bbox.anchors(k) {
        let closest = points
            .iter()
            .enumerate()
            .filter(|(index, _)| !taken[*index])
            .map(|(index, &point)| (index, distance_km(anchor, point)))
            .min_by(|(a_index, a), (b_index, b)| {
                a.value()
                    .total_cmp(&b.value())
                    .then_with(|| a_index.cmp(b_index))
            });

        if let Some((index, _)) = closest {
            taken[index] = true;
            centroids.push(points[index]);
        }
    }

    centroids
}

fn nearest_centroid(centroids: &[Coordinates], point: Coordinates) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (cluster, &center) in centroids.iter().enumerate() {
        let distance = distance_km(center, point).value();
        if distance < best_distance {
            best = cluster;
            best_distance = distance;
        }
    }

    best
}

fn cluster_centroid(
    points: &[Coordinates],
    assignments: &[usize],
    cluster: usize,
) -> Option<Coordinates> {
    centroid(
        points
            .iter()
            .zip(assignments)
            .filter(|(_, assigned)| **assigned == cluster)
            .map(|(&point, _)| point),
    )
}

/// Empty clusters keep their previous centroid.
fn update_centroids(points: &[Coordinates], assignments: &[usize], centroids: &mut [Coordinates]) {
    for (cluster, center) in centroids.iter_mut().enumerate() {
        if let Some(updated) = cluster_centroid(points, assignments, cluster) {
            *center = updated;
        }
    }
}

/// Moves the point farthest from the centroid of the largest cluster into
/// each empty cluster until none is left empty.
fn fill_empty_clusters(
    points: &[Coordinates],
    assignments: &mut [usize],
    centroids: &mut [Coordinates],
) {
    loop {
        let mut sizes = vec![0usize; centroids.len()];
        for &cluster in assignments.iter() {
            sizes[cluster] += 1;
        }

        let Some(empty) = sizes.iter().position(|&size| size == 0) else {
            return;
        };

        // Ties resolve to the lowest cluster index.
        let Some((largest, &largest_size)) = sizes
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, size)| **size)
        else {
            return;
        };

        if largest_size < 2 {
            return;
        }

        let center = centroids[largest];
        let Some(outlier) = assignments
            .iter()
            .enumerate()
            .filter(|(_, cluster)| **cluster == largest)
            .map(|(index, _)| (index, distance_km(center, points[index]).value()))
            .fold(None, |farthest: Option<(usize, f64)>, (index, distance)| {
                match farthest {
                    Some((_, best)) if distance <= best => farthest,
                    _ => Some((index, distance)),
                }
            })
            .map(|(index, _)| index)
        else {
            return;
        };

        debug!(cluster = empty, stop = outlier, "refilling empty cluster");

        assignments[outlier] = empty;
        centroids[empty] = points[outlier];
        if let Some(updated) = cluster_centroid(points, assignments, largest) {
            centroids[largest] = updated;
        }
    }
}
