use crate::models::{Address, ServiceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body POSTed to create a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub professional_id: String,
    pub work_description: String,
    pub address: Address,
    pub service_type: ServiceType,
}

/// Acknowledgment returned for a created reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationAck {
    pub reservation_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body POSTed to the coverage validation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRequest {
    pub address: Address,
    pub service_type: ServiceType,
}

/// Coverage validation response; `details` is passed through for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResponse {
    pub within_coverage: bool,
    #[serde(default)]
    pub details: serde_json::Value,
}

/// Error body some endpoints return on rejection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerErrorBody {
    pub message: Option<String>,
}
