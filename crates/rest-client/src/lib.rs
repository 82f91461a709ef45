//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - Form-encoded POST (the courier API's transport) and plain GET
//! - JSON response deserialization
//! - Header injection
//! - Rate limit detection and retryability classification
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Envelope {
//!     code: i32,
//!     message: String,
//! }
//!
//! let client = RestClient::with_default_timeout("https://open-api-tra.flashexpress.com")?;
//! let form = vec![("mchId".to_string(), "AA0001".to_string())];
//! let response: Envelope = client.post_form("/open/v1/warehouses", &form, None).await?;
//! ```

mod client;
mod error;

pub use client::RestClient;
pub use error::RestError;
