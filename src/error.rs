use thiserror::Error;

/// Fallback shown when the server declines a reservation without a message
pub const GENERIC_SUBMISSION_ERROR: &str = "Could not create the reservation";

/// Errors crossing the collaborator boundary.
///
/// Validation-path errors are swallowed by the validator (they degrade to
/// "no outcome"); submission-path errors surface to the user and are
/// recoverable by retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("request rejected (status {status}): {message:?}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// User-facing message: the server-provided one when present, else the
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_SUBMISSION_ERROR.to_string(),
        }
    }
}
