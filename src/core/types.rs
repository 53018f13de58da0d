use crate::core::errors::MbPayError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Uniform `{code, message, data}` wrapper around every platform response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// 0 on success, a platform error code otherwise
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Anything other than a JSON object (absent, `null`, `[]`) decodes as empty
    #[serde(default, deserialize_with = "object_or_empty")]
    pub data: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

impl ResponseEnvelope {
    pub fn new(code: i64, message: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Decode a raw response body
    pub fn from_body(body: &str) -> Result<Self, MbPayError> {
        Ok(serde_json::from_str(body)?)
    }

    pub const fn is_success(&self) -> bool {
        self.code == 0
    }

    /// `None` on success, otherwise the platform code and message as a business error
    pub fn to_error(&self) -> Option<MbPayError> {
        if self.is_success() {
            None
        } else {
            Some(MbPayError::api(self.code, self.message.clone()))
        }
    }

    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// The `data` payload on success, the business error otherwise
    pub fn into_result(self) -> Result<Map<String, Value>, MbPayError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(MbPayError::api(self.code, self.message))
        }
    }
}

/// Merchant balance, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Available balance
    pub balance: i64,
    /// Frozen balance
    pub frozen: i64,
}

/// Payout from the merchant balance to a user address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRequest {
    /// Receiving address
    pub address: String,
    /// Merchant order number, the platform's idempotency key
    pub order_no: String,
    /// Amount in minor units (100 = 1 MB)
    pub amount: i64,
    pub remark: Option<String>,
}

impl PayRequest {
    pub fn new(address: impl Into<String>, order_no: impl Into<String>, amount: i64) -> Self {
        Self {
            address: address.into(),
            order_no: order_no.into(),
            amount,
            remark: None,
        }
    }

    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResponse {
    pub platform_order_no: String,
    pub actual_amount: i64,
    pub fee: i64,
    /// Merchant balance left after the payout
    pub balance: i64,
}

/// Input for a locally generated `mbpay://` payment link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLinkRequest {
    pub order_no: String,
    /// Product description
    pub subject: String,
    pub amount: i64,
    /// Validity in minutes
    pub expire: i64,
    /// Generated when absent; `Some("")` is sent as an empty nonce
    pub nonce: Option<String>,
    pub notify_url: Option<String>,
}

impl PaymentLinkRequest {
    pub fn new(
        order_no: impl Into<String>,
        subject: impl Into<String>,
        amount: i64,
        expire: i64,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            subject: subject.into(),
            amount,
            expire,
            nonce: None,
            notify_url: None,
        }
    }

    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    #[must_use]
    pub fn with_notify_url(mut self, notify_url: impl Into<String>) -> Self {
        self.notify_url = Some(notify_url.into());
        self
    }
}

/// Hosted checkout order created on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrderRequest {
    pub merchant_id: i64,
    pub order_no: String,
    pub subject: String,
    pub amount: i64,
    pub notify_url: String,
}

impl PaymentOrderRequest {
    pub fn new(
        merchant_id: i64,
        order_no: impl Into<String>,
        subject: impl Into<String>,
        amount: i64,
        notify_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id,
            order_no: order_no.into(),
            subject: subject.into(),
            amount,
            notify_url: notify_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrderResponse {
    /// Checkout page URL
    pub payment_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfoResponse {
    pub order_no: String,
    pub platform_order_no: String,
    pub amount: i64,
    pub platform_fee: i64,
    pub status: i32,
    pub status_text: String,
    pub expires_at: String,
    pub created_at: String,
    pub paid_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayOrderInfoResponse {
    pub order_no: String,
    pub platform_order_no: String,
    pub amount: i64,
    pub fee: i64,
    pub actual_amount: i64,
    pub status: i32,
    pub status_text: String,
    pub remark: String,
    pub create_at: String,
    pub update_at: String,
    pub pay_address: String,
}
