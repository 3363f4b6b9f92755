use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    handlers::{
        clusters::clusters_handler,
        optimize::optimize_handler,
        status::{health_handler, root_handler, schema_handler},
    },
    state::AppState,
};

pub fn app_routes(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/schema", get(schema_handler))
        .route("/optimize", post(optimize_handler))
        .route("/clusters", post(clusters_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
