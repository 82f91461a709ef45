//! Canonical request signing for the courier open API.
//!
//! The provider authenticates each call by recomputing, on its side, an
//! uppercase SHA-256 digest over a canonical rendering of the request
//! parameters with the shared key appended. Both sides must apply the exact
//! same filtering, normalization, and ordering rules or the signatures
//! diverge.

use crate::credentials::ProviderCredentials;
use crate::error::AuthError;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Field name under which the signature travels in the form body.
pub const SIGN_FIELD: &str = "sign";

/// Fields excluded from the signature base by default.
///
/// - `sign`: the signature itself, present when re-verifying an inbound
///   notification.
/// - `subParcels`: serialized and transmitted as separate JSON text.
/// - `timestamp`: transport metadata; the provider's verifier does not
///   include it in the base string.
pub const DEFAULT_EXCLUDED_FIELDS: &[&str] = &["sign", "subParcels", "timestamp"];

/// The set of fields that stay out of the signature base.
///
/// Kept explicit rather than inferred from value types, so that a change in
/// the provider contract is a configuration change.
#[derive(Debug, Clone)]
pub struct SigningProfile {
    excluded: BTreeSet<String>,
}

impl Default for SigningProfile {
    fn default() -> Self {
        Self::with_excluded(DEFAULT_EXCLUDED_FIELDS.iter().copied())
    }
}

impl SigningProfile {
    /// Create a profile with an explicit exclusion set.
    pub fn with_excluded<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a field is excluded from signing.
    pub fn is_excluded(&self, field: &str) -> bool {
        self.excluded.contains(field)
    }
}

/// Request signer for authenticated courier API calls.
///
/// Pure and stateless: no I/O, no mutation of the caller's map, safe to use
/// from any number of tasks concurrently.
pub struct RequestSigner<'a> {
    credentials: &'a ProviderCredentials,
    profile: SigningProfile,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer with the default signing profile.
    pub fn new(credentials: &'a ProviderCredentials) -> Self {
        Self::with_profile(credentials, SigningProfile::default())
    }

    /// Create a signer with a custom signing profile.
    pub fn with_profile(credentials: &'a ProviderCredentials, profile: SigningProfile) -> Self {
        Self {
            credentials,
            profile,
        }
    }

    /// Compute the signature over a parameter map.
    ///
    /// This method:
    /// 1. Drops excluded fields, nulls, and blank values
    /// 2. Normalizes the remaining values to their wire text
    /// 3. Orders keys byte-wise ascending
    /// 4. Joins `key=value` pairs with `&`, without URL encoding
    /// 5. Appends `&key=<secret>` and hashes with SHA-256
    ///
    /// # Errors
    /// - `AuthError::MissingSecretKey` if the signing key is empty; nothing
    ///   is hashed in that case.
    /// - `AuthError::MalformedParameter` if a non-excluded field holds an
    ///   array or object.
    ///
    /// # Returns
    /// The digest as a 64-character uppercase hex string.
    pub fn compute_signature(&self, params: &Map<String, Value>) -> Result<String, AuthError> {
        let secret = self.credentials.expose_secret();
        if secret.is_empty() {
            return Err(AuthError::MissingSecretKey);
        }

        // BTreeMap gives the byte-wise key order the verifier expects.
        let mut canonical: BTreeMap<&str, String> = BTreeMap::new();

        for (field, value) in params {
            if self.profile.is_excluded(field) {
                continue;
            }

            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(flag) => if *flag { "1" } else { "0" }.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(AuthError::MalformedParameter {
                        field: field.clone(),
                    });
                }
            };

            if is_blank(&text) {
                continue;
            }

            canonical.insert(field, text);
        }

        let base = canonical
            .iter()
            .map(|(field, text)| format!("{}={}", field, text))
            .collect::<Vec<_>>()
            .join("&");

        tracing::trace!(base = %base, "signature base assembled");

        let mut hasher = Sha256::new();
        hasher.update(base.as_bytes());
        hasher.update(b"&key=");
        hasher.update(secret.as_bytes());

        Ok(hex::encode(hasher.finalize()).to_uppercase())
    }

    /// Sign a parameter map and return a copy with `sign` attached.
    ///
    /// The returned map is what the transport layer serializes as the
    /// request body.
    pub fn signed_params(&self, params: &Map<String, Value>) -> Result<Map<String, Value>, AuthError> {
        let signature = self.compute_signature(params)?;

        let mut signed = params.clone();
        signed.insert(SIGN_FIELD.to_string(), Value::String(signature));
        Ok(signed)
    }

    /// Verify the signature carried by an inbound parameter map.
    ///
    /// Used for provider webhooks: the presented `sign` field is excluded
    /// from the recomputed base by the profile, so the map can be passed in
    /// as received.
    ///
    /// Returns `Ok(false)` when `sign` is absent or does not match.
    pub fn verify_signature(&self, params: &Map<String, Value>) -> Result<bool, AuthError> {
        let presented = match params.get(SIGN_FIELD).and_then(Value::as_str) {
            Some(signature) => signature,
            None => return Ok(false),
        };

        let expected = self.compute_signature(params)?;
        Ok(presented.eq_ignore_ascii_case(&expected))
    }
}

/// Blank under the verifier's trimming rule.
///
/// The remote side strips ordinary whitespace, the control range
/// U+0009–U+000D, and U+001C–U+001F before deciding a value is absent;
/// values reduced to nothing by that rule must not enter the base string.
fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_whitespace() || matches!(c, '\u{09}'..='\u{0d}' | '\u{1c}'..='\u{1f}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(secret: &str) -> ProviderCredentials {
        ProviderCredentials::new("AAXXXX".into(), secret.into())
    }

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_sign_known_vector() {
        // Fixed vector in the shape of the provider's signing documentation:
        // sorted base is
        // mchId=AAXXXX&nonceStr=1536749552628&outTradeNo=123456789XXXX&weight=1000&key=FLASHSECRET123
        let creds = credentials("FLASHSECRET123");
        let signer = RequestSigner::new(&creds);

        let map = params(&[
            ("mchId", Value::String("AAXXXX".into())),
            ("nonceStr", Value::String("1536749552628".into())),
            ("outTradeNo", Value::String("123456789XXXX".into())),
            ("weight", Value::String("1000".into())),
        ]);

        assert_eq!(
            signer.compute_signature(&map).unwrap(),
            "20BE66411B9650BB4F31CD9AA5369E793F9D63A3C082F97F10A9AA7BA7006B1E"
        );
    }

    #[test]
    fn test_sign_known_vector_mixed_types() {
        // Pins number/bool normalization and UTF-8 hashing:
        // codEnabled=0&expressCategory=1&insured=1&srcName=สมชาย&weight=1000&key=shhh
        let creds = credentials("shhh");
        let signer = RequestSigner::new(&creds);

        let map = params(&[
            ("codEnabled", Value::Bool(false)),
            ("expressCategory", Value::from(1)),
            ("insured", Value::Bool(true)),
            ("srcName", Value::String("สมชาย".into())),
            ("weight", Value::from(1000)),
        ]);

        assert_eq!(
            signer.compute_signature(&map).unwrap(),
            "C350CF6FC14F8B7CC83CC7FB50A0DE7C10AF294B823B9764F74D543D38D4F430"
        );
    }

    #[test]
    fn test_signature_format() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let signature = signer.compute_signature(&map).unwrap();

        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(signature, signature.to_uppercase());
    }

    #[test]
    fn test_deterministic() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[
            ("outTradeNo", Value::String("SO-1".into())),
            ("weight", Value::from(500)),
        ]);

        assert_eq!(
            signer.compute_signature(&map).unwrap(),
            signer.compute_signature(&map).unwrap()
        );
    }

    #[test]
    fn test_insertion_order_independent() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let forward = params(&[
            ("alpha", Value::String("1".into())),
            ("middle", Value::String("2".into())),
            ("zebra", Value::String("3".into())),
        ]);
        let reversed = params(&[
            ("zebra", Value::String("3".into())),
            ("middle", Value::String("2".into())),
            ("alpha", Value::String("1".into())),
        ]);

        assert_eq!(
            signer.compute_signature(&forward).unwrap(),
            signer.compute_signature(&reversed).unwrap()
        );
    }

    #[test]
    fn test_excluded_fields_do_not_affect_signature() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let bare = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let mut noisy = bare.clone();
        noisy.insert("sign".into(), Value::String("BOGUS".into()));
        noisy.insert("timestamp".into(), Value::from(1536749552628_i64));
        noisy.insert(
            "subParcels".into(),
            Value::Array(vec![Value::String("P1".into())]),
        );

        assert_eq!(
            signer.compute_signature(&bare).unwrap(),
            signer.compute_signature(&noisy).unwrap()
        );
    }

    #[test]
    fn test_null_and_blank_values_pruned() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let bare = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let mut noisy = bare.clone();
        noisy.insert("remark".into(), Value::Null);
        noisy.insert("dstName".into(), Value::String(String::new()));
        noisy.insert("srcName".into(), Value::String("   ".into()));
        noisy.insert("srcPhone".into(), Value::String("\t\r\n".into()));

        assert_eq!(
            signer.compute_signature(&bare).unwrap(),
            signer.compute_signature(&noisy).unwrap()
        );
    }

    #[test]
    fn test_control_range_values_pruned() {
        // U+001C..U+001F are stripped by the remote verifier even though
        // they are not Unicode whitespace.
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let bare = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let mut noisy = bare.clone();
        noisy.insert(
            "remark".into(),
            Value::String("\u{1c}\u{1d}\u{1e}\u{1f}".into()),
        );

        assert_eq!(
            signer.compute_signature(&bare).unwrap(),
            signer.compute_signature(&noisy).unwrap()
        );
    }

    #[test]
    fn test_embedded_control_characters_are_kept() {
        // Only values consisting solely of stripped characters vanish; a
        // value with real content around them still participates.
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let plain = params(&[("remark", Value::String("ab".into()))]);
        let embedded = params(&[("remark", Value::String("a\tb".into()))]);

        assert_ne!(
            signer.compute_signature(&plain).unwrap(),
            signer.compute_signature(&embedded).unwrap()
        );
    }

    #[test]
    fn test_value_change_changes_signature() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let original = params(&[("weight", Value::from(1000))]);
        let changed = params(&[("weight", Value::from(1001))]);

        assert_ne!(
            signer.compute_signature(&original).unwrap(),
            signer.compute_signature(&changed).unwrap()
        );
    }

    #[test]
    fn test_key_change_changes_signature() {
        let map = params(&[("weight", Value::from(1000))]);

        let creds_a = credentials("secret-a");
        let creds_b = credentials("secret-b");

        assert_ne!(
            RequestSigner::new(&creds_a).compute_signature(&map).unwrap(),
            RequestSigner::new(&creds_b).compute_signature(&map).unwrap()
        );
    }

    #[test]
    fn test_empty_secret_is_configuration_error() {
        let creds = credentials("");
        let signer = RequestSigner::new(&creds);

        let map = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let err = signer.compute_signature(&map).unwrap_err();

        assert!(matches!(err, AuthError::MissingSecretKey));
    }

    #[test]
    fn test_structured_value_rejected() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let with_object = params(&[("sender", Value::Object(Map::new()))]);
        let err = signer.compute_signature(&with_object).unwrap_err();
        assert!(matches!(
            err,
            AuthError::MalformedParameter { ref field } if field == "sender"
        ));

        let with_array = params(&[("items", Value::Array(vec![Value::from(1)]))]);
        let err = signer.compute_signature(&with_array).unwrap_err();
        assert!(matches!(
            err,
            AuthError::MalformedParameter { ref field } if field == "items"
        ));
    }

    #[test]
    fn test_custom_profile_overrides_exclusions() {
        let creds = credentials("secret");
        let profile = SigningProfile::with_excluded(["items"]);
        let signer = RequestSigner::with_profile(&creds, profile);

        // `items` is excluded, so its array value is never inspected.
        let map = params(&[
            ("outTradeNo", Value::String("SO-1".into())),
            ("items", Value::Array(vec![Value::from(1)])),
        ]);
        assert!(signer.compute_signature(&map).is_ok());

        // The default exclusions no longer apply under the custom profile.
        let bare = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let mut with_timestamp = bare.clone();
        with_timestamp.insert("timestamp".into(), Value::from(1));
        assert_ne!(
            signer.compute_signature(&bare).unwrap(),
            signer.compute_signature(&with_timestamp).unwrap()
        );
    }

    #[test]
    fn test_signed_params_attaches_sign() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[("outTradeNo", Value::String("SO-1".into()))]);
        let signed = signer.signed_params(&map).unwrap();

        let attached = signed.get(SIGN_FIELD).and_then(Value::as_str).unwrap();
        assert_eq!(attached, signer.compute_signature(&map).unwrap());

        // Caller's map is untouched.
        assert!(!map.contains_key(SIGN_FIELD));
    }

    #[test]
    fn test_verify_accepts_own_signature() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[
            ("pno", Value::String("TH0123456789".into())),
            ("state", Value::from(5)),
        ]);
        let signed = signer.signed_params(&map).unwrap();

        assert!(signer.verify_signature(&signed).unwrap());
    }

    #[test]
    fn test_verify_rejects_tampered_params() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[
            ("pno", Value::String("TH0123456789".into())),
            ("state", Value::from(5)),
        ]);
        let mut signed = signer.signed_params(&map).unwrap();
        signed.insert("state".into(), Value::from(6));

        assert!(!signer.verify_signature(&signed).unwrap());
    }

    #[test]
    fn test_verify_without_sign_field() {
        let creds = credentials("secret");
        let signer = RequestSigner::new(&creds);

        let map = params(&[("pno", Value::String("TH0123456789".into()))]);
        assert!(!signer.verify_signature(&map).unwrap());
    }
}
