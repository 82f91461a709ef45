//! Authentication and request signing for the courier open API.
//!
//! This crate provides secure credential management and the canonical
//! request-signing algorithm the courier's servers verify.
//!
//! # Features
//!
//! - **Secure Credentials**: the signing key is wrapped in `SecretString` to
//!   prevent accidental logging and ensure memory is zeroed on drop.
//! - **Canonical Signing**: filters, normalizes, and byte-orders the request
//!   parameters, then computes an uppercase SHA-256 digest over the
//!   canonical string with the secret key appended.
//! - **Webhook Verification**: recomputes the signature carried by inbound
//!   status notifications and compares it against the presented one.
//! - **Environment Loading**: credentials can be loaded from environment
//!   variables or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ProviderCredentials, RequestSigner};
//! use serde_json::{Map, Value};
//!
//! // Load credentials from environment
//! let credentials = ProviderCredentials::from_env()?;
//!
//! // Create a signer
//! let signer = RequestSigner::new(&credentials);
//!
//! // Sign a parameter map; `sign` is attached to the returned copy
//! let mut params = Map::new();
//! params.insert("outTradeNo".into(), Value::String("SO-10001".into()));
//! params.insert("weight".into(), Value::from(1200));
//! let form = signer.signed_params(&params)?;
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::ProviderCredentials;
pub use error::AuthError;
pub use signer::{DEFAULT_EXCLUDED_FIELDS, RequestSigner, SIGN_FIELD, SigningProfile};
