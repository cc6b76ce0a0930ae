use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{ApiResponse, Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::basket::repository::BasketRepository;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
}

impl HealthCheckResponse {
    fn with_status(status: &str) -> Json<Self> {
        Json(Self {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// Liveness and readiness probes
pub struct Api {
    repository: Arc<dyn BasketRepository>,
}

impl Api {
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self { repository }
    }
}

#[OpenApi]
impl Api {
    /// Liveness probe
    ///
    /// Succeeds while the process is serving requests.
    #[oai(path = "/health/live", method = "get", tag = "ApiTags::Health")]
    async fn live(&self) -> Json<HealthCheckResponse> {
        HealthCheckResponse::with_status("healthy")
    }

    /// Readiness probe
    ///
    /// Pings the basket store; answers 503 while it is unreachable.
    #[oai(path = "/health/ready", method = "get", tag = "ApiTags::Health")]
    async fn ready(&self) -> ReadinessResponse {
        match self.repository.ping().await {
            Ok(()) => ReadinessResponse::Ready(HealthCheckResponse::with_status("healthy")),
            Err(err) => {
                tracing::warn!(error = %err, "basket store is not ready");
                ReadinessResponse::NotReady(HealthCheckResponse::with_status("unhealthy"))
            }
        }
    }
}

#[derive(ApiResponse)]
pub enum ReadinessResponse {
    #[oai(status = 200)]
    Ready(Json<HealthCheckResponse>),
    #[oai(status = 503)]
    NotReady(Json<HealthCheckResponse>),
}
