use crate::api::traits::{CoverageApi, Notifier, ReservationApi};
use crate::api::types::{ReservationAck, ReservationRequest};
use crate::error::ApiError;
use crate::models::{CoverageOutcome, NotificationEvent, ValidationRequestKey};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// In-process stand-in for the marketplace backend.
///
/// Serves coverage by a district allow-list and hands out sequential
/// reservation ids. Used by the demo binary when no live API is configured.
pub struct MockBackend {
    covered_districts: Vec<String>,
    next_id: AtomicU64,
}

impl MockBackend {
    pub fn new(covered_districts: &[&str]) -> Self {
        Self {
            covered_districts: covered_districts.iter().map(|d| d.to_string()).collect(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(&["Centro", "North", "Palermo"])
    }
}

#[async_trait]
impl CoverageApi for MockBackend {
    async fn validate(&self, key: &ValidationRequestKey) -> Result<CoverageOutcome, ApiError> {
        let within = self
            .covered_districts
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&key.district));
        Ok(CoverageOutcome {
            within_coverage: within,
            details: json!({
                "district": key.district,
                "coveredDistricts": self.covered_districts,
            }),
        })
    }
}

#[async_trait]
impl ReservationApi for MockBackend {
    async fn create(&self, request: &ReservationRequest) -> Result<ReservationAck, ApiError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        info!(
            "Mock backend accepted reservation for professional {}",
            request.professional_id
        );
        Ok(ReservationAck {
            reservation_id: format!("mock-reservation-{}", id),
            created_at: Utc::now(),
        })
    }
}

#[async_trait]
impl Notifier for MockBackend {
    async fn notify(&self, event: NotificationEvent) {
        info!("🔔 [{}] {}: {}", event.category, event.title, event.message);
    }
}
