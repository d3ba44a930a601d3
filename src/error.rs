//! Error taxonomy for simulation requests.

/// Why a simulation request produced no result.
///
/// `InvalidInput` and `OutOfRange` are the caller's fault and are reported
/// back verbatim. `Internal` marks a defect inside a model; its message is
/// for logs only and is never shown to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("'{field}' = {value} exceeds the supported maximum of {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("internal error in {stage}: {detail}")]
    Internal { stage: &'static str, detail: String },
}

impl SimError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Request field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SimError::InvalidInput { field, .. } | SimError::OutOfRange { field, .. } => {
                Some(field)
            }
            SimError::Internal { .. } => None,
        }
    }

    /// Returns true if the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SimError::Internal { .. })
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SimError::InvalidInput { .. } => "invalid_input",
            SimError::OutOfRange { .. } => "out_of_range",
            SimError::Internal { .. } => "internal_error",
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
