use std::fmt;
use thiserror::Error;

/// Error codes defined by the MBPay platform.
///
/// Codes the platform adds later still round-trip through [`ErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    AppIdEmpty,
    SignEmpty,
    TimestampEmpty,
    MerchantNotExists,
    SignError,
    ParamError,
    MerchantNotExists2,
    MerchantStatusError,
    MerchantNotExists3,
    InsufficientBalance,
    OrderExistsOrAddrNotFound,
    SystemError,
    OrderNoEmpty,
    OrderNotFound,
    Unknown(i64),
}

impl ErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Success,
            12000 => Self::AppIdEmpty,
            12001 => Self::SignEmpty,
            12002 => Self::TimestampEmpty,
            12003 => Self::MerchantNotExists,
            12005 => Self::SignError,
            12006 => Self::ParamError,
            12007 => Self::MerchantNotExists2,
            12008 => Self::MerchantStatusError,
            12009 => Self::MerchantNotExists3,
            12010 => Self::InsufficientBalance,
            12011 => Self::OrderExistsOrAddrNotFound,
            12012 => Self::SystemError,
            12013 => Self::OrderNoEmpty,
            12014 => Self::OrderNotFound,
            other => Self::Unknown(other),
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Success => 0,
            Self::AppIdEmpty => 12000,
            Self::SignEmpty => 12001,
            Self::TimestampEmpty => 12002,
            Self::MerchantNotExists => 12003,
            Self::SignError => 12005,
            Self::ParamError => 12006,
            Self::MerchantNotExists2 => 12007,
            Self::MerchantStatusError => 12008,
            Self::MerchantNotExists3 => 12009,
            Self::InsufficientBalance => 12010,
            Self::OrderExistsOrAddrNotFound => 12011,
            Self::SystemError => 12012,
            Self::OrderNoEmpty => 12013,
            Self::OrderNotFound => 12014,
            Self::Unknown(code) => code,
        }
    }

    /// Human readable description, for logs and debugging only.
    ///
    /// Returns `None` for codes the platform has not documented.
    pub const fn description(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("success"),
            Self::AppIdEmpty => Some("app_id is empty"),
            Self::SignEmpty => Some("sign is empty"),
            Self::TimestampEmpty => Some("timestamp is empty"),
            Self::MerchantNotExists | Self::MerchantNotExists2 | Self::MerchantNotExists3 => {
                Some("merchant does not exist")
            }
            Self::SignError => Some("signature mismatch"),
            Self::ParamError => Some("invalid parameters"),
            Self::MerchantStatusError => Some("merchant status does not allow this operation"),
            Self::InsufficientBalance => Some("insufficient balance"),
            Self::OrderExistsOrAddrNotFound => {
                Some("order number already exists or receiving address not found")
            }
            Self::SystemError => Some("platform system error"),
            Self::OrderNoEmpty => Some("order number is empty"),
            Self::OrderNotFound => Some("order not found"),
            Self::Unknown(_) => None,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => write!(f, "{} ({})", self.code(), description),
            None => write!(f, "{}", self.code()),
        }
    }
}

/// Every failure a merchant call can produce.
///
/// The four call-time kinds stay distinguishable: a `Validation` error was never
/// sent, `Transport` and `Decode` failures happened on the wire, and `Api` carries
/// the platform's own rejection verbatim.
#[derive(Error, Debug)]
pub enum MbPayError {
    #[error("MBPay validation error [0]: {0}")]
    Validation(String),

    #[error("MBPay transport error [0]: {0}")]
    Transport(String),

    #[error("MBPay decode error [0]: {0}")]
    Decode(String),

    #[error("MBPay API Error [{code}]: {message}")]
    Api { code: i64, message: String },

    #[error("MBPay configuration error [0]: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

impl MbPayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Platform code for business errors, `0` for every locally raised error.
    pub const fn code(&self) -> i64 {
        match self {
            Self::Api { code, .. } => *code,
            _ => 0,
        }
    }

    /// Platform code mapped onto [`ErrorCode`]; `None` unless this is a business error.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(ErrorCode::from_code(*code)),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Transport(message) | Self::Decode(message) => {
                message.clone()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Config(err) => err.to_string(),
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

impl From<serde_json::Error> for MbPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("Parse response failed: {}", err))
    }
}
