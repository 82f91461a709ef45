//! Parcel order request and its wire projection.

use crate::category::{ArticleCategory, ExpressCategory};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A courier parcel order, assembled by the order-management workflow.
///
/// Monetary amounts are THB; the wire projection converts them to the
/// provider's integer satang representation. Weight is grams, as the
/// provider expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelOrderRequest {
    /// Merchant-side order number, unique per merchant.
    pub out_trade_no: String,
    pub express_category: ExpressCategory,
    pub article_category: ArticleCategory,
    /// Parcel weight in grams.
    pub weight_grams: u32,

    pub src_name: String,
    pub src_phone: String,
    pub src_province_name: String,
    pub src_city_name: String,
    pub src_district_name: Option<String>,
    pub src_postal_code: String,
    pub src_detail_address: String,

    pub dst_name: String,
    pub dst_phone: String,
    pub dst_province_name: String,
    pub dst_city_name: String,
    pub dst_district_name: Option<String>,
    pub dst_postal_code: String,
    pub dst_detail_address: String,

    /// Whether the parcel is insured; `insure_declare_value` must be set
    /// when true.
    pub insured: bool,
    /// Declared value in THB.
    pub insure_declare_value: Option<Decimal>,

    /// Whether to collect payment on delivery.
    pub cod_enabled: bool,
    /// COD amount in THB.
    pub cod_amount: Option<Decimal>,

    pub remark: Option<String>,
}

impl ParcelOrderRequest {
    /// Project onto the provider's camelCase wire fields.
    ///
    /// Unset optionals are omitted entirely; the signer's blank-pruning rule
    /// covers values that reduce to nothing. Booleans stay JSON booleans
    /// here and take their `1`/`0` wire form during canonicalization and
    /// form encoding.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();

        params.insert(
            "outTradeNo".into(),
            Value::String(self.out_trade_no.clone()),
        );
        params.insert(
            "expressCategory".into(),
            Value::from(self.express_category.as_flash_code()),
        );
        params.insert(
            "articleCategory".into(),
            Value::from(self.article_category.as_flash_code()),
        );
        params.insert("weight".into(), Value::from(self.weight_grams));

        params.insert("srcName".into(), Value::String(self.src_name.clone()));
        params.insert("srcPhone".into(), Value::String(self.src_phone.clone()));
        params.insert(
            "srcProvinceName".into(),
            Value::String(self.src_province_name.clone()),
        );
        params.insert(
            "srcCityName".into(),
            Value::String(self.src_city_name.clone()),
        );
        if let Some(district) = &self.src_district_name {
            params.insert("srcDistrictName".into(), Value::String(district.clone()));
        }
        params.insert(
            "srcPostalCode".into(),
            Value::String(self.src_postal_code.clone()),
        );
        params.insert(
            "srcDetailAddress".into(),
            Value::String(self.src_detail_address.clone()),
        );

        params.insert("dstName".into(), Value::String(self.dst_name.clone()));
        params.insert("dstPhone".into(), Value::String(self.dst_phone.clone()));
        params.insert(
            "dstProvinceName".into(),
            Value::String(self.dst_province_name.clone()),
        );
        params.insert(
            "dstCityName".into(),
            Value::String(self.dst_city_name.clone()),
        );
        if let Some(district) = &self.dst_district_name {
            params.insert("dstDistrictName".into(), Value::String(district.clone()));
        }
        params.insert(
            "dstPostalCode".into(),
            Value::String(self.dst_postal_code.clone()),
        );
        params.insert(
            "dstDetailAddress".into(),
            Value::String(self.dst_detail_address.clone()),
        );

        params.insert("insured".into(), Value::Bool(self.insured));
        if let Some(declared) = self.insure_declare_value {
            params.insert("insureDeclareValue".into(), Value::from(to_satang(declared)));
        }

        params.insert("codEnabled".into(), Value::Bool(self.cod_enabled));
        if let Some(amount) = self.cod_amount {
            params.insert("codAmount".into(), Value::from(to_satang(amount)));
        }

        if let Some(remark) = &self.remark {
            params.insert("remark".into(), Value::String(remark.clone()));
        }

        params
    }
}

/// Convert a THB amount to integer satang.
///
/// The provider's accepted COD/insurance caps sit far below `i64::MAX`
/// satang; values beyond that saturate rather than panic.
fn to_satang(amount: Decimal) -> i64 {
    (amount * Decimal::from(100))
        .round()
        .to_i64()
        .unwrap_or(i64::MAX)
}
