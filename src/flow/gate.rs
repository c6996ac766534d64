use crate::flow::validator::ValidationState;
use crate::models::ReservationDraft;
use std::fmt;

/// Why submission is currently blocked; at most one is shown at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingReason {
    AddressRequired,
    DescriptionRequired,
    ValidatingCoverage,
    OutOfCoverage,
    CoverageUnverified,
    Processing,
}

impl BlockingReason {
    /// Busy state of the submit control itself, as opposed to the
    /// guidance reasons shown in the help banner.
    pub fn is_busy(&self) -> bool {
        matches!(self, BlockingReason::Processing)
    }
}

impl fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            BlockingReason::AddressRequired => "Enter an address to continue",
            BlockingReason::DescriptionRequired => "Describe the work you need",
            BlockingReason::ValidatingCoverage => "Validating coverage for the area...",
            BlockingReason::OutOfCoverage => "The professional does not cover this area",
            BlockingReason::CoverageUnverified => {
                "Coverage for this address has not been verified yet"
            }
            BlockingReason::Processing => "Processing reservation...",
        };
        f.write_str(message)
    }
}

/// Submit-ability verdict derived from the current flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub can_submit: bool,
    pub blocking_reason: Option<BlockingReason>,
}

/// Decide whether the reservation may be submitted and which single
/// guidance message applies.
///
/// Pure function, safe to call on every state change. Conditions are
/// evaluated in fixed precedence so the user sees exactly one actionable
/// message even when several are unmet; `can_submit` is false whenever
/// any of them holds.
pub fn evaluate(
    draft: &ReservationDraft,
    validation: &ValidationState,
    submitting: bool,
) -> GateDecision {
    let blocking_reason = if !draft.has_location() {
        Some(BlockingReason::AddressRequired)
    } else if draft.work_description.trim().is_empty() {
        Some(BlockingReason::DescriptionRequired)
    } else if validation.is_in_flight() {
        Some(BlockingReason::ValidatingCoverage)
    } else {
        match validation.outcome() {
            Some(outcome) if !outcome.within_coverage => Some(BlockingReason::OutOfCoverage),
            // Inputs are complete but no validation has concluded
            // (failed, timed out, or still debouncing). Blocked, and
            // messaged distinctly from an explicit negative outcome.
            None => Some(BlockingReason::CoverageUnverified),
            Some(_) if submitting => Some(BlockingReason::Processing),
            Some(_) => None,
        }
    };

    GateDecision {
        can_submit: blocking_reason.is_none(),
        blocking_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, CoverageOutcome, ResolvedLocation};
    use serde_json::json;

    fn draft_with(description: &str, display_address: &str) -> ReservationDraft {
        let mut draft = ReservationDraft::new();
        draft.work_description = description.to_string();
        if !display_address.trim().is_empty() {
            draft.address = Address::from_display_address(display_address);
            draft.resolved_location = Some(ResolvedLocation {
                latitude: -34.6,
                longitude: -58.38,
                display_address: display_address.to_string(),
            });
        }
        draft
    }

    fn resolved(within: bool) -> ValidationState {
        ValidationState::Resolved(CoverageOutcome {
            within_coverage: within,
            details: json!({}),
        })
    }

    #[test]
    fn empty_address_and_description_blocks_on_address() {
        let decision = evaluate(&draft_with("", ""), &ValidationState::Idle, false);
        assert!(!decision.can_submit);
        assert_eq!(
            decision.blocking_reason,
            Some(BlockingReason::AddressRequired)
        );
    }

    #[test]
    fn resolved_address_with_empty_description_blocks_on_description() {
        let decision = evaluate(&draft_with("", "Main St, North"), &resolved(true), false);
        assert!(!decision.can_submit);
        assert_eq!(
            decision.blocking_reason,
            Some(BlockingReason::DescriptionRequired)
        );
    }

    #[test]
    fn in_flight_validation_blocks_on_validating() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &ValidationState::InFlight,
            false,
        );
        assert!(!decision.can_submit);
        assert_eq!(
            decision.blocking_reason,
            Some(BlockingReason::ValidatingCoverage)
        );
    }

    #[test]
    fn negative_outcome_blocks_on_out_of_coverage() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &resolved(false),
            false,
        );
        assert!(!decision.can_submit);
        assert_eq!(decision.blocking_reason, Some(BlockingReason::OutOfCoverage));
    }

    #[test]
    fn complete_form_with_positive_outcome_allows_submit() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &resolved(true),
            false,
        );
        assert!(decision.can_submit);
        assert_eq!(decision.blocking_reason, None);
    }

    #[test]
    fn submission_in_progress_shows_busy_state() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &resolved(true),
            true,
        );
        assert!(!decision.can_submit);
        assert_eq!(decision.blocking_reason, Some(BlockingReason::Processing));
        assert!(decision.blocking_reason.unwrap().is_busy());
    }

    #[test]
    fn empty_description_blocks_regardless_of_coverage() {
        for validation in [
            ValidationState::Idle,
            ValidationState::InFlight,
            resolved(true),
            resolved(false),
        ] {
            let decision = evaluate(&draft_with("  ", "Main St, North"), &validation, false);
            assert!(!decision.can_submit);
            assert_eq!(
                decision.blocking_reason,
                Some(BlockingReason::DescriptionRequired)
            );
        }
    }

    #[test]
    fn negative_outcome_blocks_even_when_not_in_flight() {
        let decision = evaluate(
            &draft_with("Paint the fence", "Main St, North"),
            &resolved(false),
            false,
        );
        assert!(!decision.can_submit);
        assert_eq!(decision.blocking_reason, Some(BlockingReason::OutOfCoverage));
    }

    #[test]
    fn absent_outcome_with_complete_inputs_blocks_distinctly() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &ValidationState::Idle,
            false,
        );
        assert!(!decision.can_submit);
        assert_eq!(
            decision.blocking_reason,
            Some(BlockingReason::CoverageUnverified)
        );
    }

    #[test]
    fn guidance_reasons_precede_busy_state() {
        let decision = evaluate(
            &draft_with("Fix the sink", "Main St, North"),
            &ValidationState::InFlight,
            true,
        );
        assert_eq!(
            decision.blocking_reason,
            Some(BlockingReason::ValidatingCoverage)
        );
        assert!(!decision.blocking_reason.unwrap().is_busy());
    }
}
