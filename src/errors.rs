//! # Error Handling for the Admin Client
//!
//! Every backend interaction funnels its failures into [`ApiError`]:
//! - User-facing messages stay short and sanitized
//! - Transport and decode detail is logged via `tracing`, never shown
//! - Callers decide whether to surface or retry; nothing retries on its own
//!
//! The taxonomy mirrors what the console actually has to distinguish:
//! transport failures, a 401 from the backend, a non-2xx response, an
//! envelope that reports `success = false`, a body that fails to decode,
//! client-side pre-submit validation, and operations a resource's backend
//! route simply does not offer.

use std::fmt;

/// Failure of any admin-console backend call.
///
/// Construct through the helper functions rather than the variants directly;
/// they keep the user-facing message and the logged internals separate.
#[derive(Debug)]
pub enum ApiError {
    /// Network or transport failure before a response arrived.
    Network {
        /// Underlying transport error (logged, not shown to the user).
        internal: reqwest::Error,
    },

    /// The backend answered 401.
    Unauthorized {
        /// User-facing message.
        message: String,
    },

    /// The backend answered with a non-2xx status other than 401.
    Backend {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response envelope, when present.
        message: Option<String>,
    },

    /// A 2xx response whose envelope carried `success = false`.
    Rejected {
        /// The backend's message, surfaced verbatim when present.
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    Decode {
        /// What was being decoded.
        context: String,
        /// Decoder detail (logged, not shown to the user).
        internal: String,
    },

    /// Client-side validation failed before any request was issued.
    ValidationFailed {
        /// One entry per failed check.
        errors: Vec<String>,
    },

    /// The resource's backend route does not offer this operation.
    Unsupported {
        /// Resource name, singular.
        resource: &'static str,
        /// Operation name, e.g. `"delete"`.
        operation: &'static str,
    },
}

impl ApiError {
    /// Wrap a transport failure.
    pub fn network(internal: reqwest::Error) -> Self {
        Self::Network { internal }
    }

    /// A 401 from the backend.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// A non-2xx, non-401 response.
    pub fn backend(status: u16, message: Option<String>) -> Self {
        Self::Backend { status, message }
    }

    /// A `success = false` envelope.
    pub fn rejected(message: Option<String>) -> Self {
        Self::Rejected { message }
    }

    /// A response body that failed to decode.
    pub fn decode(context: impl Into<String>, internal: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            internal: internal.into(),
        }
    }

    /// One or more client-side validation failures.
    #[must_use]
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// An operation the resource does not support.
    #[must_use]
    pub fn unsupported(resource: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            resource,
            operation,
        }
    }

    /// True when the backend rejected the credential (401).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The sanitized, user-facing message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "Could not reach the server".to_string(),
            Self::Unauthorized { message } => message.clone(),
            Self::Backend { message, .. } | Self::Rejected { message } => message
                .clone()
                .unwrap_or_else(|| "An error occurred".to_string()),
            Self::Decode { .. } => "The server sent an unexpected response".to_string(),
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::Unsupported {
                resource,
                operation,
            } => format!("{resource} does not support {operation}"),
        }
    }

    /// Log internal detail. Only emits when the caller has tracing set up.
    pub fn log_internal(&self) {
        match self {
            Self::Network { internal } => {
                tracing::error!(error = ?internal, "transport failure");
            }
            Self::Decode { context, internal } => {
                tracing::error!(context = %context, detail = %internal, "response decode failure");
            }
            Self::Backend { status, message } => {
                tracing::error!(status = %status, message = ?message, "backend error response");
            }
            _ => {
                tracing::debug!(error = %self.user_message(), "api error");
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network { internal } => Some(internal),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err)
    }
}
