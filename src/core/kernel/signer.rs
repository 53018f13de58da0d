use crate::core::errors::MbPayError;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Request parameters, kept in byte order of their keys
pub type Params = BTreeMap<String, String>;

pub const APP_ID_FIELD: &str = "app_id";
pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const NONCE_FIELD: &str = "nonce";
pub const SIGN_FIELD: &str = "sign";

pub const NONCE_LENGTH: usize = 16;

/// How the canonical string is turned into a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// `hex(sha256(canonical + "&key=" + secret))`, the platform's scheme
    #[default]
    KeyedSha256,
    /// `hex(hmac_sha256(secret, canonical))`
    HmacSha256,
}

/// Merchant credentials. The secret is never printed.
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    app_secret: Secret<String>,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_secret: Secret<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    fn ensure_present(&self) -> Result<(), MbPayError> {
        if self.app_id.is_empty() {
            return Err(MbPayError::validation("app_id is required"));
        }
        if self.app_secret.expose_secret().is_empty() {
            return Err(MbPayError::validation("app_secret is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .finish()
    }
}

/// A request ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub path: String,
    /// Caller parameters plus `app_id`, `timestamp`, `nonce` and `sign`
    pub params: Params,
    pub signature: String,
    pub timestamp: i64,
    pub nonce: String,
}

impl SignedRequest {
    /// Parameters as owned pairs, ready for form or query encoding
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Join every parameter except `sign` as `k=v` pairs separated by `&`, in key byte order.
///
/// Values are used verbatim; no percent-encoding is applied before hashing.
pub fn canonicalize(params: &Params) -> String {
    params
        .iter()
        .filter(|(k, _)| k.as_str() != SIGN_FIELD)
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a canonical string back into parameters.
///
/// Values are not escaped, so a value may itself contain `&` or `=`. Keys in a
/// canonical string are strictly increasing; a segment that does not start a
/// new, larger key is taken as the continuation of the previous value.
pub fn parse_canonical(canonical: &str) -> Result<Params, MbPayError> {
    let mut params = Params::new();
    if canonical.is_empty() {
        return Ok(params);
    }

    let mut last_key: Option<String> = None;
    for segment in canonical.split('&') {
        let pair = segment.split_once('=').filter(|(key, _)| {
            !key.is_empty() && !matches!(last_key.as_deref(), Some(last) if *key <= last)
        });

        if let Some((key, value)) = pair {
            params.insert(key.to_string(), value.to_string());
            last_key = Some(key.to_string());
            continue;
        }

        let Some(value) = last_key.as_deref().and_then(|last| params.get_mut(last)) else {
            return Err(MbPayError::Decode(format!(
                "not a canonical parameter string: {}",
                canonical
            )));
        };
        value.push('&');
        value.push_str(segment);
    }

    Ok(params)
}

/// Random alphanumeric nonce of `length` characters
pub fn generate_nonce(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Current Unix time in seconds
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Signer trait for request authentication
pub trait Signer: Send + Sync {
    /// Public merchant identifier carried in every request
    fn app_id(&self) -> &str;

    /// Signature over the canonical form of `params`
    fn signature(&self, params: &Params) -> Result<String, MbPayError>;

    /// Add `app_id`, `timestamp`, `nonce` and `sign` to `params`.
    ///
    /// `Some(nonce)` is used verbatim, even when empty; `None` draws a fresh one.
    /// Existing values for the four injected keys are overwritten.
    fn sign_request(
        &self,
        path: &str,
        mut params: Params,
        timestamp: i64,
        nonce: Option<String>,
    ) -> Result<SignedRequest, MbPayError> {
        let nonce = nonce.unwrap_or_else(|| generate_nonce(NONCE_LENGTH));

        params.remove(SIGN_FIELD);
        params.insert(APP_ID_FIELD.to_string(), self.app_id().to_string());
        params.insert(TIMESTAMP_FIELD.to_string(), timestamp.to_string());
        params.insert(NONCE_FIELD.to_string(), nonce.clone());

        let signature = self.signature(&params)?;
        params.insert(SIGN_FIELD.to_string(), signature.clone());

        Ok(SignedRequest {
            path: path.to_string(),
            params,
            signature,
            timestamp,
            nonce,
        })
    }

    /// Sign with the current time and a fresh nonce
    fn sign_now(&self, path: &str, params: Params) -> Result<SignedRequest, MbPayError> {
        self.sign_request(path, params, unix_timestamp(), None)
    }

    /// Recompute the signature of `params` and compare it with their `sign` entry
    fn verify(&self, params: &Params) -> Result<bool, MbPayError> {
        let Some(provided) = params.get(SIGN_FIELD) else {
            return Ok(false);
        };
        let expected = self.signature(params)?;
        Ok(expected.eq_ignore_ascii_case(provided))
    }
}

/// Signer for MBPay merchant requests
#[derive(Debug, Clone)]
pub struct MbPaySigner {
    credentials: Credentials,
    scheme: SignatureScheme,
}

impl MbPaySigner {
    pub fn new(credentials: Credentials, scheme: SignatureScheme) -> Self {
        Self {
            credentials,
            scheme,
        }
    }

    pub const fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    fn sign_keyed_sha256(&self, canonical: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hasher.update(b"&key=");
        hasher.update(self.credentials.app_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    fn sign_hmac_sha256(&self, canonical: &str) -> Result<String, MbPayError> {
        let mut mac =
            HmacSha256::new_from_slice(self.credentials.app_secret.expose_secret().as_bytes())
                .map_err(|e| MbPayError::validation(format!("Invalid app secret: {}", e)))?;
        mac.update(canonical.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for MbPaySigner {
    fn app_id(&self) -> &str {
        self.credentials.app_id()
    }

    fn signature(&self, params: &Params) -> Result<String, MbPayError> {
        self.credentials.ensure_present()?;

        let canonical = canonicalize(params);
        match self.scheme {
            SignatureScheme::KeyedSha256 => Ok(self.sign_keyed_sha256(&canonical)),
            SignatureScheme::HmacSha256 => self.sign_hmac_sha256(&canonical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(scheme: SignatureScheme) -> MbPaySigner {
        MbPaySigner::new(
            Credentials::new("1001", Secret::new("secret".to_string())),
            scheme,
        )
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_string_is_sorted_and_skips_sign() {
        let p = params(&[("timestamp", "1700000000"), ("app_id", "1001"), ("sign", "x"), ("amount", "500")]);
        assert_eq!(canonicalize(&p), "amount=500&app_id=1001&timestamp=1700000000");
    }

    #[test]
    fn test_canonical_string_uses_byte_order() {
        let p = params(&[("b", "1"), ("B", "2"), ("a_c", "3"), ("ab", "4")]);
        assert_eq!(canonicalize(&p), "B=2&a_c=3&ab=4&b=1");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let p = params(&[("order_no", "ORD1"), ("amount", "500"), ("address", "0xABC")]);
        let once = canonicalize(&p);
        let twice = canonicalize(&parse_canonical(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_canonical_keeps_delimiters_inside_values() {
        let p = params(&[
            ("order_no", "ORD1"),
            ("subject", "Coffee & Cake"),
            ("notify_url", "https://shop.example/n?a=1&b=2"),
            ("remark", "x&&a="),
        ]);
        let once = canonicalize(&p);
        let parsed = parse_canonical(&once).unwrap();

        assert_eq!(parsed, p);
        assert_eq!(canonicalize(&parsed), once);
    }

    #[test]
    fn test_parse_canonical_empty_and_malformed() {
        assert!(parse_canonical("").unwrap().is_empty());
        assert!(parse_canonical("no_pair_here").unwrap_err().is_decode());
        assert!(parse_canonical("=value").unwrap_err().is_decode());
    }

    #[test]
    fn test_keyed_sha256_matches_platform_formula() {
        let p = params(&[("app_id", "1001"), ("timestamp", "1700000000")]);
        let expected = hex::encode(Sha256::digest(
            b"app_id=1001&timestamp=1700000000&key=secret",
        ));
        assert_eq!(signer(SignatureScheme::KeyedSha256).signature(&p).unwrap(), expected);
    }

    #[test]
    fn test_hmac_scheme_differs_from_keyed_sha256() {
        let p = params(&[("app_id", "1001")]);
        let keyed = signer(SignatureScheme::KeyedSha256).signature(&p).unwrap();
        let hmac = signer(SignatureScheme::HmacSha256).signature(&p).unwrap();
        assert_ne!(keyed, hmac);
        assert_eq!(hmac.len(), 64);
        assert!(hmac.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hmac_scheme_matches_keyed_mac() {
        let p = params(&[("app_id", "1001"), ("sign", "ignored"), ("timestamp", "1700000000")]);
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(b"app_id=1001&timestamp=1700000000");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(signer(SignatureScheme::HmacSha256).signature(&p).unwrap(), expected);
    }

    #[test]
    fn test_sign_request_injects_fields() {
        let signed = signer(SignatureScheme::KeyedSha256)
            .sign_request(
                "/merchant/pay",
                params(&[("order_no", "ORD1"), ("sign", "stale"), ("app_id", "forged")]),
                1_700_000_000,
                Some("abc".to_string()),
            )
            .unwrap();

        assert_eq!(signed.path, "/merchant/pay");
        assert_eq!(signed.params["app_id"], "1001");
        assert_eq!(signed.params["timestamp"], "1700000000");
        assert_eq!(signed.params["nonce"], "abc");
        assert_eq!(signed.params["sign"], signed.signature);
        assert_ne!(signed.signature, "stale");
        assert_eq!(signed.form_pairs().len(), 5);
    }

    #[test]
    fn test_explicit_empty_nonce_is_kept() {
        let signed = signer(SignatureScheme::KeyedSha256)
            .sign_request("/p", Params::new(), 1, Some(String::new()))
            .unwrap();
        assert_eq!(signed.nonce, "");
        assert_eq!(signed.params["nonce"], "");
    }

    #[test]
    fn test_generated_nonce_is_alphanumeric() {
        let signed = signer(SignatureScheme::KeyedSha256)
            .sign_now("/p", Params::new())
            .unwrap();
        assert_eq!(signed.nonce.len(), NONCE_LENGTH);
        assert!(signed.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_nonce(NONCE_LENGTH), generate_nonce(NONCE_LENGTH));
    }

    #[test]
    fn test_verify_accepts_own_signature_and_rejects_tampering() {
        let s = signer(SignatureScheme::KeyedSha256);
        let signed = s
            .sign_request("/p", params(&[("amount", "500")]), 10, Some("n".into()))
            .unwrap();
        assert!(s.verify(&signed.params).unwrap());

        let mut tampered = signed.params;
        tampered.insert("amount".into(), "501".into());
        assert!(!s.verify(&tampered).unwrap());

        assert!(!s.verify(&params(&[("amount", "500")])).unwrap());
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        let no_secret = MbPaySigner::new(
            Credentials::new("1001", Secret::new(String::new())),
            SignatureScheme::KeyedSha256,
        );
        let err = no_secret.signature(&Params::new()).unwrap_err();
        assert!(err.is_validation());

        let no_app = MbPaySigner::new(
            Credentials::new("", Secret::new("secret".into())),
            SignatureScheme::KeyedSha256,
        );
        assert!(no_app.sign_now("/p", Params::new()).unwrap_err().is_validation());
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let rendered = format!("{:?}", signer(SignatureScheme::KeyedSha256));
        assert!(!rendered.contains("\"secret\""));
        assert!(rendered.contains("REDACTED"));
    }
}
