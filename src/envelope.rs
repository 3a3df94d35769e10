//! Response envelope normalization.
//!
//! Read endpoints wrap their payload in `{ success, data, message }`, but
//! the field names arrive in either leading-lowercase or leading-uppercase
//! form depending on the endpoint. That quirk is absorbed here, at the
//! client boundary: everything above works with one canonical shape.

use serde::Deserialize;

use crate::errors::ApiError;

/// The backend's `{ success, data, message }` wrapper, either casing.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Success flag (`success` or `Success`).
    #[serde(alias = "Success", default)]
    pub success: bool,
    /// Payload (`data` or `Data`); absent on some write acknowledgments.
    #[serde(alias = "Data", default = "Option::default")]
    pub data: Option<T>,
    /// Optional human-readable message (`message` or `Message`).
    #[serde(alias = "Message", default)]
    pub message: Option<String>,
}

/// Acknowledgment of a write: the envelope with its payload stripped.
#[derive(Debug, Clone)]
pub struct Ack {
    /// The backend's message, when it sent one.
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, converting `success = false` into
    /// [`ApiError::Rejected`] carrying the backend's message.
    pub fn into_data(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::rejected(self.message))
        }
    }

    /// Unwrap a write acknowledgment, discarding any payload.
    pub fn into_ack(self) -> Result<Ack, ApiError> {
        if self.success {
            Ok(Ack {
                message: self.message,
            })
        } else {
            Err(ApiError::rejected(self.message))
        }
    }
}
