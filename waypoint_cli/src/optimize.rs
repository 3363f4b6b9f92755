use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use tracing::{info, warn};
use waypoint_optimizer::{
    json::types::{
        FromRequest, JsonOptimizationConfig, JsonOptimizationRequest, JsonOptimizationResponse,
    },
    solver::{
        optimizer::Optimizer,
        optimizer_params::{OptimizerParams, Threads},
    },
};

use crate::parsers;

#[derive(Args)]
pub struct OptimizeArgs {
    /// The request file to optimize
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Overrides the time budget of the request (e.g. "2s", "PT1M", "1500")
    #[arg(short, long, value_parser = parsers::parse_time_budget)]
    timeout: Option<jiff::SignedDuration>,

    /// Overrides the number of groups of the request
    #[arg(short, long)]
    groups: Option<i64>,

    #[arg(long, default_value = "auto")]
    threads: Threads,

    /// Writes the response JSON to this file
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let mut content: JsonOptimizationRequest = serde_json::from_reader(BufReader::new(file))?;

    if let Some(timeout) = args.timeout {
        let config = content.config.get_or_insert_with(JsonOptimizationConfig::default);
        config.time_budget_ms = Some(time_budget_ms(timeout)?);
    }
    if let Some(groups) = args.groups {
        content.group_count = Some(groups);
    }

    let request = content.build_request()?;
    let optimizer = Optimizer::new(OptimizerParams {
        threads: args.threads,
    })?;

    let result = optimizer.optimize(&request)?;

    let mut table = Table::new();
    table.set_header(vec!["group", "stops", "distance (km)", "time (min)", "converged"]);
    for (index, route) in result.routes().iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            route.len().to_string(),
            format!("{:.2}", route.distance().value()),
            format!("{:.1}", route.estimated_minutes()),
            route.converged().to_string(),
        ]);
    }
    println!("{table}");

    info!(
        "Finished: routes = {}, distance = {:.2} km, time = {:.1} min",
        result.routes().len(),
        result.total_distance().value(),
        result.total_estimated_minutes(),
    );
    if !result.converged() {
        warn!("time or iteration budget ran out before every route converged");
    }

    if let Some(out) = args.out {
        let response = JsonOptimizationResponse::from_request(&result, &request);
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&out, serde_json::to_string_pretty(&response)?)?;
        info!("Response written to {}", out.display());
    }

    Ok(())
}

fn time_budget_ms(timeout: jiff::SignedDuration) -> anyhow::Result<i64> {
    i64::try_from(timeout.as_millis()).with_context(|| format!("timeout {timeout} is too large"))
}
