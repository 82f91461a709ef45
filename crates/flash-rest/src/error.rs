//! Courier REST API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when interacting with the courier open API.
#[derive(Debug, Error)]
pub enum FlashRestError {
    /// REST client error (network, timeout, etc.).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Signing/credential error; the request was never sent.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Provider rejected the request (returned by the courier).
    #[error("Courier API error {code}: {message}")]
    ApiError {
        /// Provider error code.
        code: i32,
        /// Error message.
        message: String,
    },

    /// The provider could not verify our signature.
    ///
    /// Deterministic: resending the same request fails the same way. Points
    /// at the canonicalization configuration (exclusion set, blank rule,
    /// type normalization) rather than at the network.
    #[error("Courier rejected the request signature")]
    SignatureRejected,

    /// No order exists for the given tracking number.
    #[error("Order not found")]
    OrderNotFound,

    /// The provider reported success but returned no payload.
    #[error("Courier response contained no data")]
    EmptyData,
}

impl FlashRestError {
    /// Classify a provider error code into a more specific error.
    ///
    /// Code table from the provider's open-API documentation: 1002/1003 are
    /// the signature-verification failures, 1004 is an unknown order.
    pub fn from_envelope(code: i32, message: String) -> Self {
        match code {
            1002 | 1003 => Self::SignatureRejected,
            1004 => Self::OrderNotFound,
            _ => Self::ApiError { code, message },
        }
    }

    /// Check if this error indicates the operation should be retried.
    ///
    /// A rejected signature never qualifies: the same canonicalization with
    /// the same key produces the same signature, so a retry is guaranteed to
    /// fail again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_retryable(),
            Self::SignatureRejected => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_codes_classified() {
        assert!(matches!(
            FlashRestError::from_envelope(1002, "sign invalid".into()),
            FlashRestError::SignatureRejected
        ));
        assert!(matches!(
            FlashRestError::from_envelope(1003, "sign expired".into()),
            FlashRestError::SignatureRejected
        ));
    }

    #[test]
    fn test_order_not_found_classified() {
        assert!(matches!(
            FlashRestError::from_envelope(1004, "order not found".into()),
            FlashRestError::OrderNotFound
        ));
    }

    #[test]
    fn test_other_codes_are_generic_api_errors() {
        let err = FlashRestError::from_envelope(0, "system error".into());
        assert!(matches!(
            err,
            FlashRestError::ApiError { code: 0, ref message } if message == "system error"
        ));
    }

    #[test]
    fn test_signature_rejection_is_not_retryable() {
        assert!(!FlashRestError::SignatureRejected.is_retryable());
    }

    #[test]
    fn test_transport_retryability_passes_through() {
        assert!(FlashRestError::Rest(RestError::Timeout).is_retryable());
        assert!(
            !FlashRestError::Rest(RestError::Http {
                status: 400,
                body: String::new()
            })
            .is_retryable()
        );
    }

    #[test]
    fn test_api_errors_are_not_retryable() {
        let err = FlashRestError::from_envelope(0, "system error".into());
        assert!(!err.is_retryable());
    }
}
