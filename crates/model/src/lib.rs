//! Domain types for courier parcel orders.
//!
//! The back-office workflow assembles a [`ParcelOrderRequest`] from its own
//! order data; `to_params` projects it onto the provider's camelCase wire
//! fields, ready for signing and form encoding.

mod category;
mod parcel;

pub use category::{ArticleCategory, ExpressCategory};
pub use parcel::ParcelOrderRequest;
