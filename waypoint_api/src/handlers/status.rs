use axum::Json;
use schemars::schema_for;
use serde::Serialize;
use waypoint_optimizer::json::types::JsonOptimizationRequest;

#[derive(Serialize)]
pub struct ServiceInfo {
    service: &'static str,
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "waypoint",
        status: "online",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health_handler() -> Json<Health> {
    Json(Health { status: "healthy" })
}

pub async fn schema_handler() -> Json<schemars::Schema> {
    Json(schema_for!(JsonOptimizationRequest))
}
