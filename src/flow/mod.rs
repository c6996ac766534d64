pub mod gate;
pub mod validator;

use crate::api::traits::{CoverageApi, Notifier, ReservationApi};
use crate::api::types::{ReservationAck, ReservationRequest};
use crate::models::{
    Address, NotificationAction, NotificationEvent, Professional, ReservationDraft,
    ResolvedLocation, ServiceType,
};
use self::gate::GateDecision;
use self::validator::{CoverageValidator, ValidationState};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle of the one-shot reservation submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded(ReservationAck),
    Failed(String),
}

/// One open reservation flow for one professional.
///
/// Owns the draft, the scoped coverage validator, and the submission
/// lifecycle. At most one flow is open at a time; all state changes happen
/// in event order on the owning task.
pub struct ReservationFlow {
    professional: Professional,
    draft: ReservationDraft,
    validator: CoverageValidator,
    validation: watch::Receiver<ValidationState>,
    submission: SubmissionState,
    reservations: Arc<dyn ReservationApi>,
    notifier: Arc<dyn Notifier>,
}

impl ReservationFlow {
    /// Open a flow with an empty draft
    pub fn open(
        professional: Professional,
        coverage: Arc<dyn CoverageApi>,
        reservations: Arc<dyn ReservationApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let validator = CoverageValidator::new(coverage, &professional.id);
        let validation = validator.subscribe();
        Self {
            professional,
            draft: ReservationDraft::new(),
            validator,
            validation,
            submission: SubmissionState::Idle,
            reservations,
            notifier,
        }
    }

    pub fn professional(&self) -> &Professional {
        &self.professional
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn validation_state(&self) -> ValidationState {
        self.validation.borrow().clone()
    }

    /// Current submit-ability and guidance message
    pub fn gate(&self) -> GateDecision {
        let submitting = matches!(self.submission, SubmissionState::Submitting);
        gate::evaluate(&self.draft, &self.validation.borrow(), submitting)
    }

    pub fn set_work_description(&mut self, description: &str) {
        self.draft.work_description = description.to_string();
    }

    pub fn set_service_type(&mut self, service_type: ServiceType) {
        self.draft.service_type = service_type;
        self.revalidate();
    }

    /// Direct edit of the address fields
    pub fn set_address(&mut self, address: Address) {
        self.draft.address = address;
        self.revalidate();
    }

    /// Apply a picked location, deriving street/district from its display
    /// address (first-comma split).
    pub fn set_location(&mut self, location: ResolvedLocation) {
        self.draft.address = Address::from_display_address(&location.display_address);
        self.draft.resolved_location = Some(location);
        self.revalidate();
    }

    /// Wait until the current inputs have a completed validation attempt
    /// (resolved, failed, or timed out). Returns immediately when nothing
    /// is pending.
    pub async fn validation_settled(&mut self) {
        loop {
            let waiting =
                self.validator.is_pending() || self.validation.borrow().is_in_flight();
            if !waiting {
                return;
            }
            if self.validation.changed().await.is_err() {
                return;
            }
        }
    }

    fn revalidate(&mut self) {
        self.validator
            .input_changed(&self.draft.address, self.draft.service_type);
    }

    /// Submit the reservation. Ignored while a submission is in progress
    /// or while the gate blocks; terminal messages from a previous attempt
    /// are cleared when a new one starts.
    pub async fn submit(&mut self) {
        if matches!(self.submission, SubmissionState::Submitting) {
            debug!("Submit ignored: already submitting");
            return;
        }
        let decision = self.gate();
        if !decision.can_submit {
            debug!("Submit ignored: {:?}", decision.blocking_reason);
            return;
        }

        self.submission = SubmissionState::Submitting;
        let request = ReservationRequest {
            professional_id: self.professional.id.clone(),
            work_description: self.draft.work_description.clone(),
            address: self.draft.address.clone(),
            service_type: self.draft.service_type,
        };

        match self.reservations.create(&request).await {
            Ok(ack) => {
                info!(
                    "Reservation {} created with {}",
                    ack.reservation_id, self.professional.owner_name
                );
                self.notifier.notify(self.success_notification()).await;
                self.submission = SubmissionState::Succeeded(ack);
            }
            Err(err) => {
                warn!("Reservation creation failed: {}", err);
                // Draft stays intact so the user can retry as-is
                self.submission = SubmissionState::Failed(err.user_message());
            }
        }
    }

    fn success_notification(&self) -> NotificationEvent {
        NotificationEvent {
            category: "reservation_accepted".to_string(),
            title: "Order created".to_string(),
            message: format!(
                "Your reservation with {} has been created. Coordinate date and time over chat.",
                self.professional.owner_name
            ),
            icon: "📋".to_string(),
            link: "/my-reservations".to_string(),
            actions: vec![NotificationAction {
                action: "view".to_string(),
                title: "View reservations".to_string(),
            }],
        }
    }

    /// Tear the flow down, cancelling any pending validation timer and
    /// discarding the draft.
    pub fn close(mut self) {
        self.validator.shutdown();
    }
}
