use thiserror::Error;

/// Errors that can occur while preparing an authenticated request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The signing key is not configured.
    ///
    /// Fatal for the calling operation: a request signed with an empty key
    /// can never verify on the provider side, so no request is sent.
    #[error("shipping provider credentials not configured: signing key is empty")]
    MissingSecretKey,

    /// A field value the signer cannot canonicalize deterministically.
    ///
    /// Structured values must be pre-serialized by the caller (and either
    /// excluded from signing or covered by the documented sub-serialization
    /// rule) before the map reaches the signer.
    #[error("cannot sign field '{field}': structured values must be pre-serialized or excluded")]
    MalformedParameter {
        /// Name of the offending field.
        field: String,
    },
}
