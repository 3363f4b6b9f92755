use crate::problem::{
    config::OptimizationConfig, location::Coordinates, request::OptimizationRequest, stop::Stop,
};

/// Stops named `s0`, `s1`, ... at the given `(lat, lon)` pairs.
pub fn create_stops(coordinates: &[(f64, f64)]) -> Vec<Stop> {
    coordinates
        .iter()
        .enumerate()
        .map(|(index, &(lat, lon))| {
            Stop::new(
                format!("s{index}"),
                Coordinates::new(lat, lon),
                format!("{index} Main Street"),
            )
        })
        .collect()
}

pub fn create_request(coordinates: &[(f64, f64)], group_count: usize) -> OptimizationRequest {
    create_request_with_config(coordinates, group_count, OptimizationConfig::default())
}

pub fn create_request_with_config(
    coordinates: &[(f64, f64)],
    group_count: usize,
    config: OptimizationConfig,
) -> OptimizationRequest {
    OptimizationRequest::new(create_stops(coordinates), group_count, config).unwrap()
}

/// `rows * cols` points spaced by `step` degrees, row by row.
pub fn create_location_grid(rows: usize, cols: usize, step: f64) -> Vec<(f64, f64)> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row as f64 * step, col as f64 * step)))
        .collect()
}

/// Deterministic scatter of `count` points in a square of `size` degrees
/// around `center`, produced by a small linear congruential sequence.
pub fn create_scattered_locations(count: usize, center: (f64, f64), size: f64) -> Vec<(f64, f64)> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|_| {
            let lat = center.0 + (next() - 0.5) * size;
            let lon = center.1 + (next() - 0.5) * size;
            (lat, lon)
        })
        .collect()
}
