//! Secure provider credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the signing key
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Credentials for the courier open API.
///
/// The signing key is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ProviderCredentials {
    merchant_id: String,
    secret_key: SecretString,
}

impl ProviderCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `FLASH_MERCHANT_ID` - The merchant customer id (public)
    /// - `FLASH_SECRET_KEY` - The signing key (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let merchant_id = std::env::var("FLASH_MERCHANT_ID")
            .map_err(|_| AuthError::MissingEnvVar("FLASH_MERCHANT_ID".into()))?;

        let secret_key = std::env::var("FLASH_SECRET_KEY")
            .map_err(|_| AuthError::MissingEnvVar("FLASH_SECRET_KEY".into()))?;

        Ok(Self::new(merchant_id, secret_key))
    }

    /// Create credentials from explicit values.
    ///
    /// Useful for testing or when credentials come from other sources.
    pub fn new(merchant_id: String, secret_key: String) -> Self {
        Self {
            merchant_id,
            secret_key: SecretString::from(secret_key),
        }
    }

    /// Get the merchant id (public, safe to log).
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Expose the signing key for signature computation.
    ///
    /// **WARNING**: Only use this for the signing step itself.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
