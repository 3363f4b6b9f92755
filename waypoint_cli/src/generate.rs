use std::path::{Path, PathBuf};

use clap::Subcommand;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use waypoint_optimizer::json::types::{JsonOptimizationRequest, JsonStop};

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// Writes a random request with stops scattered around a few hubs
    Request {
        #[arg(short, long, default_value_t = 100)]
        stops: usize,

        #[arg(short, long, default_value_t = 1)]
        groups: i64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Center of the generated area as "lat,lon"
        #[arg(long, default_value = "51.0543,3.7174")]
        center: String,

        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    JsonSchema {
        /// Output file of the schema
        #[arg(long, short = 'o')]
        out: PathBuf,

        /// Writes the schema of the response instead of the request
        #[arg(long)]
        response: bool,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::Request {
            stops,
            groups,
            seed,
            center,
            out,
        } => {
            let center = parse_center(&center)?;
            let request = JsonOptimizationRequest {
                stops: random_stops(stops, center, seed),
                group_count: Some(groups),
                config: None,
            };

            write(&out, serde_json::to_string_pretty(&request)?)?;
        }
        GenerateSubcommands::JsonSchema { out, response } => {
            let schema = if response {
                waypoint_optimizer::json::schema::generate_response_json_schema()?
            } else {
                waypoint_optimizer::json::schema::generate_json_schema()?
            };
            write(&out, schema)?;
        }
    }

    Ok(())
}

fn write(out: &Path, content: String) -> Result<(), anyhow::Error> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, content)?;
    Ok(())
}

fn parse_center(input: &str) -> Result<(f64, f64), anyhow::Error> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("center must be formatted as 'lat,lon'"))?;
    Ok((lat.trim().parse()?, lon.trim().parse()?))
}

/// Stops are spread around a handful of hubs within roughly 20 km of the
/// center, so that clustering has something to find.
fn random_stops(count: usize, (lat, lon): (f64, f64), seed: u64) -> Vec<JsonStop> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hub_count = count.clamp(1, 5);
    let hubs: Vec<(f64, f64)> = (0..hub_count)
        .map(|_| {
            (
                lat + rng.random_range(-0.15..0.15),
                lon + rng.random_range(-0.25..0.25),
            )
        })
        .collect();

    (0..count)
        .map(|i| {
            let (hub_lat, hub_lon) = hubs[rng.random_range(0..hub_count)];
            JsonStop {
                id: format!("stop-{}", i + 1),
                latitude: (hub_lat + rng.random_range(-0.03..0.03)).clamp(-90.0, 90.0),
                longitude: (hub_lon + rng.random_range(-0.05..0.05)).clamp(-180.0, 180.0),
                address: String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_stops_are_reproducible() {
        let first = random_stops(20, (51.05, 3.72), 7);
        let second = random_stops(20, (51.05, 3.72), 7);

        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
        assert!(
            first
                .iter()
                .all(|stop| (stop.latitude - 51.05).abs() < 0.2 && (stop.longitude - 3.72).abs() < 0.31)
        );
    }

    #[test]
    fn test_random_stops_build_a_valid_request() {
        let request = JsonOptimizationRequest {
            stops: random_stops(30, (51.05, 3.72), 1),
            group_count: Some(3),
            config: None,
        };

        let request = request.build_request().unwrap();
        assert_eq!(request.len(), 30);
    }

    #[test]
    fn test_json_schema_of_response() {
        let out = std::env::temp_dir().join("waypoint_response_schema.json");

        run(GenerateSubcommands::JsonSchema {
            out: out.clone(),
            response: true,
        })
        .unwrap();

        let schema = std::fs::read_to_string(&out).unwrap();
        assert!(schema.contains("overallTotalDistanceKm"));
        assert!(!schema.contains("timeBudgetMs"));
    }

    #[test]
    fn test_parse_center() {
        assert_eq!(parse_center("51.5, 3.25").unwrap(), (51.5, 3.25));
        assert!(parse_center("51.5").is_err());
    }
}
