use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use waypoint_optimizer::json::types::{
    FromRequest, JsonClustersResponse, JsonOptimizationRequest,
};

use crate::{error::ApiError, state::AppState};

/// Groups the stops by area without ordering them.
pub async fn clusters_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JsonOptimizationRequest>, JsonRejection>,
) -> Result<Json<JsonClustersResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.build_request()?;

    let response = tokio::task::spawn_blocking(move || {
        let groups = state.optimizer.cluster(&request);
        JsonClustersResponse::from_request(groups.as_slice(), &request)
    })
    .await?;

    Ok(Json(response))
}
