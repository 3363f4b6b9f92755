use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{OptimizeError, ValidationError},
    problem::{
        config::OptimizationConfig,
        kmh::Kmh,
        location::Coordinates,
        request::OptimizationRequest,
        stop::{Stop, StopIdx},
    },
    solver::route::{OptimizationResult, Route},
};

pub trait FromRequest<T> {
    fn from_request(value: T, request: &OptimizationRequest) -> Self;
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "OptimizationRequest", rename_all = "camelCase")]
pub struct JsonOptimizationRequest {
    #[serde(default)]
    pub stops: Vec<JsonStop>,
    /// Number of groups (vehicles) to split the stops into, 1 when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonOptimizationConfig>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename = "Stop", rename_all = "camelCase")]
pub struct JsonStop {
    pub id: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, Clone, Debug)]
#[serde(deny_unknown_fields, rename = "OptimizationConfig", rename_all = "camelCase")]
pub struct JsonOptimizationConfig {
    pub average_speed_kmh: Option<f64>,
    pub per_stop_minutes: Option<f64>,
    pub max_iterations: Option<i64>,
    pub time_budget_ms: Option<i64>,
}

impl JsonOptimizationRequest {
    pub fn build_request(self) -> Result<OptimizationRequest, ValidationError> {
        let group_count = match self.group_count {
            None => 1,
            Some(count) if count <= 0 => return Err(ValidationError::InvalidGroupCount(count)),
            Some(count) => {
                usize::try_from(count).map_err(|_| ValidationError::InvalidGroupCount(count))?
            }
        };

        let config = self.config.unwrap_or_default().build_config()?;

        let stops = self
            .stops
            .into_iter()
            .map(JsonStop::build_stop)
            .collect::<Result<Vec<_>, _>>()?;

        OptimizationRequest::new(stops, group_count, config)
    }
}

impl JsonStop {
    fn build_stop(self) -> Result<Stop, ValidationError> {
        let coordinates = Coordinates::try_new(self.latitude, self.longitude).map_err(|source| {
            ValidationError::Coordinate {
                stop_id: self.id.clone(),
                source,
            }
        })?;

        Ok(Stop::new(self.id, coordinates, self.address))
    }
}

impl FromRequest<&Stop> for JsonStop {
    fn from_request(value: &Stop, _request: &OptimizationRequest) -> Self {
        JsonStop {
            id: value.id().to_owned(),
            latitude: value.coordinates().lat(),
            longitude: value.coordinates().lon(),
            address: value.address().to_owned(),
        }
    }
}

impl JsonOptimizationConfig {
    fn build_config(self) -> Result<OptimizationConfig, ValidationError> {
        let defaults = OptimizationConfig::default();

        let max_iterations = self
            .max_iterations
            .map(|value| non_negative("maxIterations", value))
            .transpose()?;

        let time_budget = self
            .time_budget_ms
            .map(|value| non_negative("timeBudgetMs", value))
            .transpose()?
            .map_or(defaults.time_budget, |ms| Duration::from_millis(ms as u64));

        let config = OptimizationConfig {
            average_speed: self.average_speed_kmh.map_or(defaults.average_speed, Kmh::new),
            per_stop_minutes: self.per_stop_minutes.unwrap_or(defaults.per_stop_minutes),
            max_iterations,
            time_budget,
        };
        config.validate()?;

        Ok(config)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<usize, ValidationError> {
    usize::try_from(value).map_err(|_| ValidationError::InvalidConfig {
        field,
        message: format!("must be at least 0, got {value}"),
    })
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "OptimizationResponse", rename_all = "camelCase")]
pub struct JsonOptimizationResponse {
    pub groups: Vec<JsonRoute>,
    pub overall_total_distance_km: f64,
    pub overall_estimated_time_minutes: f64,
    /// False when at least one group stopped before reaching a local optimum.
    pub converged: bool,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "Route", rename_all = "camelCase")]
pub struct JsonRoute {
    pub stops: Vec<JsonSequencedStop>,
    pub total_distance_km: f64,
    pub estimated_time_minutes: f64,
    pub converged: bool,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "SequencedStop")]
pub struct JsonSequencedStop {
    #[serde(flatten)]
    pub stop: JsonStop,
    /// 1-based position of the stop in its route.
    pub sequence: usize,
}

impl FromRequest<&Route> for JsonRoute {
    fn from_request(value: &Route, request: &OptimizationRequest) -> Self {
        JsonRoute {
            stops: value
                .sequenced_stops()
                .map(|(sequence, stop_id)| JsonSequencedStop {
                    stop: JsonStop::from_request(request.stop(stop_id), request),
                    sequence,
                })
                .collect(),
            total_distance_km: value.distance().value(),
            estimated_time_minutes: value.estimated_minutes(),
            converged: value.converged(),
        }
    }
}

impl FromRequest<&OptimizationResult> for JsonOptimizationResponse {
    fn from_request(value: &OptimizationResult, request: &OptimizationRequest) -> Self {
        JsonOptimizationResponse {
            groups: value
                .routes()
                .iter()
                .map(|route| JsonRoute::from_request(route, request))
                .collect(),
            overall_total_distance_km: value.total_distance().value(),
            overall_estimated_time_minutes: value.total_estimated_minutes(),
            converged: value.converged(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "Clusters", rename_all = "camelCase")]
pub struct JsonClustersResponse {
    pub clusters: Vec<JsonCluster>,
    pub total_clusters: usize,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "Cluster", rename_all = "camelCase")]
pub struct JsonCluster {
    pub cluster_id: usize,
    pub stops: Vec<JsonStop>,
    pub count: usize,
}

impl FromRequest<&[Vec<StopIdx>]> for JsonClustersResponse {
    fn from_request(value: &[Vec<StopIdx>], request: &OptimizationRequest) -> Self {
        JsonClustersResponse {
            clusters: value
                .iter()
                .enumerate()
                .map(|(cluster_id, group)| JsonCluster {
                    cluster_id,
                    stops: group
                        .iter()
                        .map(|&stop_id| JsonStop::from_request(request.stop(stop_id), request))
                        .collect(),
                    count: group.len(),
                })
                .collect(),
            total_clusters: value.len(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq)]
#[serde(rename = "Error")]
pub struct JsonError {
    /// `ValidationError` or `InternalFault`.
    pub kind: String,
    pub reason: String,
    pub message: String,
}

impl From<&OptimizeError> for JsonError {
    fn from(error: &OptimizeError) -> Self {
        JsonError {
            kind: error.kind().to_owned(),
            reason: error.reason().to_owned(),
            message: error.to_string(),
        }
    }
}
