//! Client-side orchestration for marketplace service reservations.
//!
//! The core is the reservation eligibility and submission-gating engine:
//! [`CoverageValidator`] debounces address/service-type input and keeps a
//! key-matched, race-safe coverage outcome; [`flow::gate::evaluate`] turns
//! form state, validation state, and the submission flag into one
//! submit/block verdict; [`ReservationFlow`] owns the draft and the
//! submission lifecycle.

pub mod api;
pub mod error;
pub mod flow;
pub mod models;

pub use error::ApiError;
pub use flow::gate::{evaluate, BlockingReason, GateDecision};
pub use flow::validator::{CoverageValidator, ValidationState, DEBOUNCE, VALIDATION_TIMEOUT};
pub use flow::{ReservationFlow, SubmissionState};
