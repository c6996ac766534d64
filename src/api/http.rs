use crate::api::traits::{CoverageApi, ReservationApi};
use crate::api::types::{
    CoverageRequest, CoverageResponse, ReservationAck, ReservationRequest, ServerErrorBody,
};
use crate::error::ApiError;
use crate::models::{Address, CoverageOutcome, ValidationRequestKey};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")
}

/// Turn a non-2xx response into `ApiError::Rejected`, picking up the
/// optional `message` field from the error body.
async fn rejection(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ServerErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    ApiError::Rejected { status, message }
}

/// Coverage validation backed by the marketplace HTTP API
pub struct HttpCoverageApi {
    client: Client,
    base_url: String,
}

impl HttpCoverageApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CoverageApi for HttpCoverageApi {
    async fn validate(&self, key: &ValidationRequestKey) -> Result<CoverageOutcome, ApiError> {
        let url = format!(
            "{}/professionals/{}/coverage",
            self.base_url, key.professional_id
        );
        debug!("Validating coverage via {}", url);

        let body = CoverageRequest {
            address: Address {
                street: key.street.clone(),
                district: key.district.clone(),
            },
            service_type: key.service_type,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let parsed: CoverageResponse = response.json().await?;
        Ok(CoverageOutcome {
            within_coverage: parsed.within_coverage,
            details: parsed.details,
        })
    }
}

/// Reservation creation backed by the marketplace HTTP API
pub struct HttpReservationApi {
    client: Client,
    base_url: String,
}

impl HttpReservationApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
    async fn create(&self, request: &ReservationRequest) -> Result<ReservationAck, ApiError> {
        let url = format!("{}/reservations", self.base_url);
        debug!("Creating reservation via {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json().await?)
    }
}
