use crate::error::ApiError;
use crate::models::{CoverageOutcome, NotificationEvent, ValidationRequestKey};
use crate::api::types::{ReservationAck, ReservationRequest};
use async_trait::async_trait;

/// Coverage validation collaborator.
/// Retries and backoff are the implementation's concern, not the caller's.
#[async_trait]
pub trait CoverageApi: Send + Sync {
    /// Check whether the professional services the keyed address
    async fn validate(&self, key: &ValidationRequestKey) -> Result<CoverageOutcome, ApiError>;
}

/// Reservation creation collaborator
#[async_trait]
pub trait ReservationApi: Send + Sync {
    /// Create a reservation, returning an acknowledgment or a structured error
    async fn create(&self, request: &ReservationRequest) -> Result<ReservationAck, ApiError>;
}

/// Notification collaborator; fire-and-forget from the flow's perspective
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: NotificationEvent);
}
