use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;
use waypoint_optimizer::{
    error::OptimizeError,
    json::types::{FromRequest, JsonOptimizationRequest, JsonOptimizationResponse},
};

use crate::{error::ApiError, state::AppState};

pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JsonOptimizationRequest>, JsonRejection>,
) -> Result<Json<JsonOptimizationResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.build_request()?;

    debug!(
        stops = request.len(),
        groups = request.group_count(),
        "optimization requested"
    );

    let response = tokio::task::spawn_blocking(move || {
        let result = state.optimizer.optimize(&request)?;
        Ok::<_, OptimizeError>(JsonOptimizationResponse::from_request(&result, &request))
    })
    .await??;

    Ok(Json(response))
}
