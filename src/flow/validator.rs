use crate::api::traits::CoverageApi;
use crate::models::{Address, CoverageOutcome, ServiceType, ValidationRequestKey};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Quiet period an input must survive before a validation request fires
pub const DEBOUNCE: Duration = Duration::from_millis(1000);

/// Upper bound on a single coverage call; expiry degrades to no outcome
/// so the gate cannot stay stuck on "validating" forever.
pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(15);

/// What consumers observe about the current coverage validation
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValidationState {
    /// No validation has completed for the current inputs
    #[default]
    Idle,
    /// A request for the current inputs is on the wire
    InFlight,
    /// A request for the current inputs completed
    Resolved(CoverageOutcome),
}

impl ValidationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, ValidationState::InFlight)
    }

    pub fn outcome(&self) -> Option<&CoverageOutcome> {
        match self {
            ValidationState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Debounced coverage validation scoped to one reservation flow.
///
/// Every qualifying input change restarts a trailing debounce window; a
/// request fires only once input has been stable for the full window and
/// both address fields are non-empty. Responses are applied only while
/// their [`ValidationRequestKey`] still matches the latest settled inputs
/// (last-key-wins). Dispatched requests are never cancelled, their results
/// are discarded instead.
pub struct CoverageValidator {
    api: Arc<dyn CoverageApi>,
    professional_id: String,
    debounce: Duration,
    state_tx: watch::Sender<ValidationState>,
    current_key: Arc<Mutex<Option<ValidationRequestKey>>>,
    timer: Option<JoinHandle<()>>,
}

impl CoverageValidator {
    pub fn new(api: Arc<dyn CoverageApi>, professional_id: &str) -> Self {
        Self::with_debounce(api, professional_id, DEBOUNCE)
    }

    pub fn with_debounce(
        api: Arc<dyn CoverageApi>,
        professional_id: &str,
        debounce: Duration,
    ) -> Self {
        let (state_tx, _) = watch::channel(ValidationState::Idle);
        Self {
            api,
            professional_id: professional_id.to_string(),
            debounce,
            state_tx,
            current_key: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    /// Observe validation state reactively
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current validation state
    pub fn state(&self) -> ValidationState {
        self.state_tx.borrow().clone()
    }

    /// Called on every change to the address or service-type inputs.
    ///
    /// Incomplete input clears the outcome and the pending timer right
    /// away, without waiting out the debounce window.
    pub fn input_changed(&mut self, address: &Address, service_type: ServiceType) {
        self.cancel_timer();

        if !address.is_complete() {
            // Key swap and publish stay under one guard so no racing
            // response can slip between them.
            let mut current = self.lock_key();
            *current = None;
            self.state_tx.send_replace(ValidationState::Idle);
            return;
        }

        let key = ValidationRequestKey::new(&self.professional_id, address, service_type);
        {
            let mut current = self.lock_key();
            if current.as_ref() != Some(&key) {
                // Key changed: any existing outcome belongs to abandoned
                // inputs and must not linger.
                *current = Some(key.clone());
                self.state_tx.send_replace(ValidationState::Idle);
            }
        }

        let api = Arc::clone(&self.api);
        let state_tx = self.state_tx.clone();
        let current_key = Arc::clone(&self.current_key);
        let request_key = Arc::clone(&self.current_key);
        let debounce = self.debounce;

        self.timer = Some(tokio::spawn(async move {
            sleep(debounce).await;
            {
                let current = current_key
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if current.as_ref() != Some(&key) {
                    return;
                }
                state_tx.send_replace(ValidationState::InFlight);
            }

            // Detached on purpose: a dispatched request outlives timer
            // restarts and is discarded by key, not aborted.
            tokio::spawn(async move {
                let result = timeout(VALIDATION_TIMEOUT, api.validate(&key)).await;

                // Guard is held across the publish: the key check and the
                // state update must be one atomic step or a stale response
                // could overwrite state freshly keyed by the caller.
                let current = request_key
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if current.as_ref() != Some(&key) {
                    debug!(
                        "Discarding stale coverage response for {} / {}",
                        key.street, key.district
                    );
                    return;
                }

                match result {
                    Ok(Ok(outcome)) => {
                        debug!(
                            "Coverage resolved for {} / {}: within={}",
                            key.street, key.district, outcome.within_coverage
                        );
                        state_tx.send_replace(ValidationState::Resolved(outcome));
                    }
                    Ok(Err(err)) => {
                        warn!("Coverage validation failed, treating as no outcome: {}", err);
                        state_tx.send_replace(ValidationState::Idle);
                    }
                    Err(_) => {
                        warn!(
                            "Coverage validation timed out after {:?}, treating as no outcome",
                            VALIDATION_TIMEOUT
                        );
                        state_tx.send_replace(ValidationState::Idle);
                    }
                }
            });
        }));
    }

    /// True while a debounce timer is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.timer
            .as_ref()
            .map(|timer| !timer.is_finished())
            .unwrap_or(false)
    }

    /// Cancel the pending debounce timer; called on flow teardown
    pub fn shutdown(&mut self) {
        self.cancel_timer();
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn lock_key(&self) -> std::sync::MutexGuard<'_, Option<ValidationRequestKey>> {
        // Lock is only held for key reads/writes, never across an await,
        // so poisoning can only come from a panicking peer.
        self.current_key
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for CoverageValidator {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
