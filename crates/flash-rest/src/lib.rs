//! Courier REST API client.
//!
//! This crate provides a typed client for the courier's open API with:
//!
//! - **Request signing**: every call is canonicalized and signed via the
//!   `auth` crate before it leaves the process
//! - **Order management**: create parcel orders (tracking-number creation),
//!   cancel orders, fetch tracking routes, retrieve labels
//! - **Error handling**: typed errors; signature rejections are classified
//!   separately and never retried
//! - **Metrics**: per-client request/error counters
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ProviderCredentials;
//! use flash_rest::FlashClient;
//!
//! // Load credentials from environment
//! let credentials = ProviderCredentials::from_env()?;
//! let client = FlashClient::new(credentials)?;
//!
//! // Create an order; the response carries the tracking number
//! let created = client.create_order(&order).await?;
//! println!("tracking number: {}", created.pno);
//!
//! // Track it
//! let routes = client.get_routes(&created.pno).await?;
//! ```

mod client;
mod error;
mod responses;

pub use client::FlashClient;
pub use error::FlashRestError;
pub use responses::{ApiEnvelope, CODE_SUCCESS, CreateOrderData, LabelData, RouteState};
