//! Contract error types for the procurement service
//!
//! These errors are transport-agnostic; the REST layer maps them onto
//! HTTP status codes (400/401/403/404/500).

/// Procurement domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcurementError {
    /// Malformed input or enum violation
    Validation {
        /// Validation error message
        message: String,
    },
    /// Actor identity could not be resolved
    Unauthenticated {
        /// Why identity resolution failed
        reason: String,
    },
    /// Actor resolved but lacks permission for the operation
    Forbidden {
        /// Which permission was missing
        reason: String,
    },
    /// Entity or history version absent
    NotFound {
        /// Resource type (tender, bid, tender version, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Storage layer failure
    Internal,
}

impl ProcurementError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for ProcurementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::Unauthenticated { reason } => {
                write!(f, "Unauthenticated: {}", reason)
            }
            Self::Forbidden { reason } => {
                write!(f, "Forbidden: {}", reason)
            }
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for ProcurementError {}
