//! Courier open-API client.

use crate::error::FlashRestError;
use crate::responses::{ApiEnvelope, CODE_SUCCESS, CreateOrderData, LabelData, RouteState};
use auth::{ProviderCredentials, RequestSigner};
use common::{ExponentialBackoff, ProviderEnvironment};
use metrics::{RequestMetrics, create_metrics};
use model::ParcelOrderRequest;
use rest_client::RestClient;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Request timeout for courier API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra attempts for idempotent queries that hit transient failures.
const QUERY_RETRY_LIMIT: u32 = 3;

/// Courier REST API client with request signing.
pub struct FlashClient {
    rest: RestClient,
    credentials: ProviderCredentials,
    environment: ProviderEnvironment,
    metrics: Arc<RequestMetrics>,
}

impl FlashClient {
    /// Create a new courier client for production.
    ///
    /// # Arguments
    /// * `credentials` - Merchant id and signing key
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ProviderCredentials) -> Result<Self, FlashRestError> {
        Self::with_environment(credentials, ProviderEnvironment::Production)
    }

    /// Create a new courier client for a specific environment.
    ///
    /// # Arguments
    /// * `credentials` - Merchant id and signing key
    /// * `environment` - Production or Sandbox
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_environment(
        credentials: ProviderCredentials,
        environment: ProviderEnvironment,
    ) -> Result<Self, FlashRestError> {
        let rest = RestClient::new(environment.rest_base_url(), REQUEST_TIMEOUT)?;

        Ok(Self {
            rest,
            credentials,
            environment,
            metrics: create_metrics(),
        })
    }

    /// Get the environment this client is connected to.
    pub fn environment(&self) -> ProviderEnvironment {
        self.environment
    }

    /// Get the merchant id (for logging/debugging).
    pub fn merchant_id(&self) -> &str {
        self.credentials.merchant_id()
    }

    /// Shared handle to this client's request counters.
    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Create a parcel order and obtain a tracking number.
    ///
    /// POST /open/v3/orders
    pub async fn create_order(
        &self,
        order: &ParcelOrderRequest,
    ) -> Result<CreateOrderData, FlashRestError> {
        let mut params = order.to_params();
        params.extend(self.base_params());

        tracing::info!(
            out_trade_no = %order.out_trade_no,
            weight_grams = order.weight_grams,
            "Creating courier order"
        );

        let envelope = self.post_envelope("/open/v3/orders", params).await?;
        let data: CreateOrderData = self.unwrap_envelope(envelope)?;

        tracing::info!(
            pno = %data.pno,
            sort_code = ?data.sort_code,
            "Courier order created"
        );

        Ok(data)
    }

    /// Cancel an order by tracking number.
    ///
    /// POST /open/v1/orders/{pno}/cancel
    pub async fn cancel_order(&self, pno: &str) -> Result<(), FlashRestError> {
        let path = format!("/open/v1/orders/{}/cancel", pno);

        tracing::info!(pno = %pno, "Canceling courier order");

        let envelope: ApiEnvelope<Value> = self.post_envelope(&path, self.base_params()).await?;
        self.check_envelope(&envelope)?;

        tracing::info!(pno = %pno, "Courier order canceled");
        Ok(())
    }

    /// Fetch the tracking states for an order.
    ///
    /// POST /open/v1/orders/{pno}/routes
    ///
    /// Idempotent, so transient transport failures are retried with
    /// exponential backoff. Provider-side rejections are returned as-is.
    pub async fn get_routes(&self, pno: &str) -> Result<Vec<RouteState>, FlashRestError> {
        let mut backoff = ExponentialBackoff::default();

        loop {
            match self.get_routes_once(pno).await {
                Ok(routes) => return Ok(routes),
                Err(err) if err.is_retryable() && backoff.attempt() < QUERY_RETRY_LIMIT => {
                    let delay = backoff.next_delay();
                    self.metrics.inc_retries();
                    tracing::warn!(
                        pno = %pno,
                        error = %err,
                        attempt = backoff.attempt(),
                        delay_ms = delay.as_millis() as u64,
                        "Retrying route query"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_routes_once(&self, pno: &str) -> Result<Vec<RouteState>, FlashRestError> {
        let path = format!("/open/v1/orders/{}/routes", pno);
        let envelope = self.post_envelope(&path, self.base_params()).await?;
        self.unwrap_envelope(envelope)
    }

    /// Fetch the provider-rendered shipping label for an order.
    ///
    /// POST /open/v1/orders/{pno}/pre_print
    pub async fn get_label(&self, pno: &str) -> Result<LabelData, FlashRestError> {
        let path = format!("/open/v1/orders/{}/pre_print", pno);
        let envelope = self.post_envelope(&path, self.base_params()).await?;
        self.unwrap_envelope(envelope)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Fields every authenticated call carries: merchant id and a fresh
    /// per-request nonce.
    fn base_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert(
            "mchId".into(),
            Value::String(self.credentials.merchant_id().to_string()),
        );
        params.insert(
            "nonceStr".into(),
            Value::String(Uuid::new_v4().simple().to_string()),
        );
        params
    }

    /// Sign the parameter map and POST it as a form body.
    async fn post_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Map<String, Value>,
    ) -> Result<ApiEnvelope<T>, FlashRestError> {
        let signer = RequestSigner::new(&self.credentials);
        let signed = signer.signed_params(&params)?;
        let form = form_pairs(&signed);

        self.metrics.inc_requests_sent();

        match self.rest.post_form(path, &form, None).await {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                self.metrics.inc_transport_errors();
                Err(err.into())
            }
        }
    }

    /// Unwrap a successful envelope's payload, classifying rejections.
    fn unwrap_envelope<T>(&self, envelope: ApiEnvelope<T>) -> Result<T, FlashRestError> {
        self.check_envelope(&envelope)?;
        envelope.data.ok_or(FlashRestError::EmptyData)
    }

    /// Check an envelope's status code without touching its payload.
    fn check_envelope<T>(&self, envelope: &ApiEnvelope<T>) -> Result<(), FlashRestError> {
        if envelope.code == CODE_SUCCESS {
            self.metrics.inc_responses_ok();
            return Ok(());
        }

        let err = FlashRestError::from_envelope(envelope.code, envelope.message.clone());
        match err {
            FlashRestError::SignatureRejected => {
                self.metrics.inc_signature_rejections();
                tracing::warn!(
                    code = envelope.code,
                    message = %envelope.message,
                    "Courier rejected signature; check exclusion set and normalization rules"
                );
            }
            _ => {
                self.metrics.inc_api_errors();
                tracing::warn!(
                    code = envelope.code,
                    message = %envelope.message,
                    "Courier API error"
                );
            }
        }
        Err(err)
    }
}

impl std::fmt::Debug for FlashClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashClient")
            .field("environment", &self.environment)
            .field("base_url", &self.environment.rest_base_url())
            .field("merchant_id", &self.credentials.merchant_id())
            .finish()
    }
}

/// Stringify a signed parameter map for form encoding.
///
/// Scalars take the same wire text the signer hashed; structured fields
/// (excluded from signing) are transmitted as their own JSON text; nulls are
/// dropped. URL encoding itself happens inside the form serializer.
fn form_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(field, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(flag) => if *flag { "1" } else { "0" }.to_string(),
                structured @ (Value::Array(_) | Value::Object(_)) => {
                    match serde_json::to_string(structured) {
                        Ok(json) => json,
                        Err(_) => return None,
                    }
                }
            };
            Some((field.clone(), text))
        })
        .collect()
}
