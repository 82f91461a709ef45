//! Courier open-API response types.

use serde::Deserialize;

/// Provider code that indicates a successful call.
pub const CODE_SUCCESS: i32 = 1;

/// Envelope every open-API response arrives in.
///
/// `code == 1` is success; any other code is a provider-side rejection with
/// `message` describing why. `data` is absent on failures and on endpoints
/// that return nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// Response data from POST /open/v3/orders.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderData {
    /// Provider-assigned tracking number.
    pub pno: String,
    #[serde(rename = "outTradeNo")]
    pub out_trade_no: String,
    #[serde(rename = "sortCode", default)]
    pub sort_code: Option<String>,
    #[serde(rename = "sortingLineCode", default)]
    pub sorting_line_code: Option<String>,
    #[serde(rename = "dstStoreName", default)]
    pub dst_store_name: Option<String>,
}

/// One tracking state from POST /open/v1/orders/{pno}/routes.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteState {
    /// Provider state code.
    pub state: i32,
    #[serde(rename = "stateText", default)]
    pub state_text: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Unix timestamp (seconds) of the state change.
    #[serde(rename = "routedAt")]
    pub routed_at: i64,
}

/// Response data from POST /open/v1/orders/{pno}/pre_print.
///
/// The provider renders the label; this crate only hands back the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelData {
    /// Base64-encoded label document, when returned inline.
    #[serde(rename = "printData", default)]
    pub print_data: Option<String>,
    /// Download URL, when the label is hosted.
    #[serde(rename = "pdfUrl", default)]
    pub pdf_url: Option<String>,
}
