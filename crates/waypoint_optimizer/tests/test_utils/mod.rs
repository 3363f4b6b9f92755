use waypoint_optimizer::problem::{
    config::OptimizationConfig, location::Coordinates, request::OptimizationRequest, stop::Stop,
};

pub fn create_request(
    coordinates: &[(f64, f64)],
    group_count: usize,
    config: OptimizationConfig,
) -> OptimizationRequest {
    let stops = coordinates
        .iter()
        .enumerate()
        .map(|(index, &(lat, lon))| {
            Stop::new(
                format!("order-{index}"),
                Coordinates::new(lat, lon),
                format!("Street {index}"),
            )
        })
        .collect();

    OptimizationRequest::new(stops, group_count, config).unwrap()
}

/// Deterministic pseudo random points in a `size` degree square around `center`.
pub fn scattered(count: usize, center: (f64, f64), size: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut state = seed ^ 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|_| {
            (
                center.0 + (next() - 0.5) * size,
                center.1 + (next() - 0.5) * size,
            )
        })
        .collect()
}
