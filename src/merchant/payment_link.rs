//! Locally generated `mbpay://` payment links.
//!
//! A link carries its own signed payload, so the wallet app can verify it against
//! the platform without the merchant making any request:
//!
//! `mbpay://payorder?data=` + percent-encode(base64(json(payload + sign)))

use crate::core::errors::MbPayError;
use crate::core::kernel::signer::{generate_nonce, Params, Signer, NONCE_LENGTH};
use crate::core::types::PaymentLinkRequest;
use crate::merchant::validation::validate_payment_link_request;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const PAYMENT_LINK_PREFIX: &str = "mbpay://payorder?data=";

/// The JSON object embedded in a payment link. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkPayload {
    pub app_id: String,
    /// Absolute Unix time in seconds after which the link is void
    pub expire: i64,
    pub nonce: String,
    pub order_no: String,
    pub amount: i64,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    pub sign: String,
}

impl PaymentLinkPayload {
    /// Every field except `sign`, as signer input
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("app_id".to_string(), self.app_id.clone());
        params.insert("expire".to_string(), self.expire.to_string());
        params.insert("nonce".to_string(), self.nonce.clone());
        params.insert("order_no".to_string(), self.order_no.clone());
        params.insert("amount".to_string(), self.amount.to_string());
        params.insert("subject".to_string(), self.subject.clone());
        if let Some(notify_url) = self.notify_url.as_ref().filter(|url| !url.is_empty()) {
            params.insert("notify_url".to_string(), notify_url.clone());
        }
        params
    }

    pub const fn is_expired(&self, now: i64) -> bool {
        now >= self.expire
    }
}

/// Validate `request` and build a signed payload valid for `request.expire` minutes after `now`
pub fn signed_payload(
    signer: &dyn Signer,
    request: &PaymentLinkRequest,
    now: i64,
) -> Result<PaymentLinkPayload, MbPayError> {
    validate_payment_link_request(request)?;

    let expire = request
        .expire
        .checked_mul(60)
        .and_then(|seconds| now.checked_add(seconds))
        .ok_or_else(|| MbPayError::validation("expire is too large"))?;

    let mut payload = PaymentLinkPayload {
        app_id: signer.app_id().to_string(),
        expire,
        nonce: request
            .nonce
            .clone()
            .unwrap_or_else(|| generate_nonce(NONCE_LENGTH)),
        order_no: request.order_no.clone(),
        amount: request.amount,
        subject: request.subject.clone(),
        notify_url: request.notify_url.clone().filter(|url| !url.is_empty()),
        sign: String::new(),
    };
    payload.sign = signer.signature(&payload.to_params())?;

    Ok(payload)
}

pub fn encode_payment_link(payload: &PaymentLinkPayload) -> Result<String, MbPayError> {
    let json = serde_json::to_string(payload)
        .map_err(|e| MbPayError::Decode(format!("Failed to serialize payment link: {}", e)))?;
    let encoded = STANDARD.encode(json.as_bytes());
    Ok(format!(
        "{}{}",
        PAYMENT_LINK_PREFIX,
        urlencoding::encode(&encoded)
    ))
}

/// Build the complete link for `request`
pub fn build_payment_link(
    signer: &dyn Signer,
    request: &PaymentLinkRequest,
    now: i64,
) -> Result<String, MbPayError> {
    let payload = signed_payload(signer, request, now)?;
    encode_payment_link(&payload)
}

pub fn decode_payment_link(link: &str) -> Result<PaymentLinkPayload, MbPayError> {
    let data = link
        .strip_prefix(PAYMENT_LINK_PREFIX)
        .ok_or_else(|| MbPayError::Decode(format!("not an mbpay payment link: {}", link)))?;

    let base64_data = urlencoding::decode(data)
        .map_err(|e| MbPayError::Decode(format!("invalid payment link encoding: {}", e)))?;
    let json = STANDARD
        .decode(base64_data.as_bytes())
        .map_err(|e| MbPayError::Decode(format!("invalid payment link base64: {}", e)))?;

    serde_json::from_slice(&json)
        .map_err(|e| MbPayError::Decode(format!("invalid payment link payload: {}", e)))
}

/// Check that `link` was signed with this signer's credentials
pub fn verify_payment_link(signer: &dyn Signer, link: &str) -> Result<bool, MbPayError> {
    let payload = decode_payment_link(link)?;
    let expected = signer.signature(&payload.to_params())?;
    Ok(expected.eq_ignore_ascii_case(&payload.sign))
}
