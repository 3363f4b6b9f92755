mod error;
mod handlers;
mod routes;
mod settings;
mod state;

use std::sync::Arc;

use axum::serve;
use tracing::{Level, info};
use waypoint_optimizer::{
    cache::BoundedResultCache,
    solver::{optimizer::Optimizer, optimizer_params::OptimizerParams},
};

use crate::{routes::app_routes, settings::Settings, state::AppState};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(if settings.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let mut optimizer = Optimizer::new(OptimizerParams {
        threads: settings.threads.clone(),
    })?;
    if settings.cache_capacity > 0 {
        optimizer =
            optimizer.with_cache(Arc::new(BoundedResultCache::new(settings.cache_capacity)));
    }

    let state = Arc::new(AppState { optimizer });
    let app = app_routes(state);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    info!(
        addr = %settings.addr,
        threads = settings.threads.number_of_threads(),
        cache_capacity = settings.cache_capacity,
        "waypoint listening"
    );

    serve(listener, app).await?;

    Ok(())
}
