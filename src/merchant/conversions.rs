use crate::core::errors::MbPayError;
use crate::core::types::{
    BalanceResponse, OrderInfoResponse, PayOrderInfoResponse, PayResponse, PaymentOrderResponse,
};
use serde_json::{Map, Value};

type Data = Map<String, Value>;

/// Read an integer field. Accepts JSON integers, floats (truncated) and numeric
/// strings; a missing or `null` field reads as 0. Values outside `i64` are rejected.
pub fn int_field(data: &Data, key: &str) -> Result<i64, MbPayError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|_| n.is_f64()).and_then(truncate_float))
            .ok_or_else(|| invalid_field(key, n)),
        Some(Value::String(s)) => parse_int_str(s).ok_or_else(|| invalid_field(key, s)),
        Some(other) => Err(invalid_field(key, other)),
    }
}

// 2^63, exactly representable
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn truncate_float(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    (truncated.is_finite() && (-I64_LIMIT..I64_LIMIT).contains(&truncated))
        .then_some(truncated as i64)
}

fn parse_int_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if !trimmed.contains(['.', 'e', 'E']) {
        return trimmed.parse::<i64>().ok();
    }
    trimmed.parse::<f64>().ok().and_then(truncate_float)
}

fn invalid_field(key: &str, value: impl std::fmt::Display) -> MbPayError {
    MbPayError::Decode(format!("invalid {} in response: {}", key, value))
}

pub fn status_field(data: &Data, key: &str) -> Result<i32, MbPayError> {
    let raw = int_field(data, key)?;
    i32::try_from(raw).map_err(|_| invalid_field(key, raw))
}

/// Read a string field; numbers are rendered, anything else reads as empty
pub fn str_field(data: &Data, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Read a string field the platform must echo back
pub fn required_str_field(data: &Data, key: &str) -> Result<String, MbPayError> {
    let value = str_field(data, key);
    if value.is_empty() {
        return Err(MbPayError::validation(format!(
            "invalid {} format in response",
            key
        )));
    }
    Ok(value)
}

pub fn convert_balance(data: &Data) -> Result<BalanceResponse, MbPayError> {
    Ok(BalanceResponse {
        balance: int_field(data, "balance")?,
        frozen: int_field(data, "frozen")?,
    })
}

pub fn convert_pay_response(data: &Data) -> Result<PayResponse, MbPayError> {
    Ok(PayResponse {
        platform_order_no: required_str_field(data, "platform_order_no")?,
        actual_amount: int_field(data, "actual_amount")?,
        fee: int_field(data, "fee")?,
        balance: int_field(data, "balance")?,
    })
}

pub fn convert_payment_order(data: &Data) -> Result<PaymentOrderResponse, MbPayError> {
    Ok(PaymentOrderResponse {
        payment_link: required_str_field(data, "payment_link")?,
    })
}

pub fn convert_order_info(data: &Data) -> Result<OrderInfoResponse, MbPayError> {
    Ok(OrderInfoResponse {
        order_no: required_str_field(data, "order_no")?,
        platform_order_no: str_field(data, "platform_order_no"),
        amount: int_field(data, "amount")?,
        platform_fee: int_field(data, "platform_fee")?,
        status: status_field(data, "status")?,
        status_text: str_field(data, "status_text"),
        expires_at: str_field(data, "expires_at"),
        created_at: str_field(data, "created_at"),
        paid_at: str_field(data, "paid_at"),
    })
}

pub fn convert_pay_order_info(data: &Data) -> Result<PayOrderInfoResponse, MbPayError> {
    Ok(PayOrderInfoResponse {
        order_no: required_str_field(data, "order_no")?,
        platform_order_no: str_field(data, "platform_order_no"),
        amount: int_field(data, "amount")?,
        fee: int_field(data, "fee")?,
        actual_amount: int_field(data, "actual_amount")?,
        status: status_field(data, "status")?,
        status_text: str_field(data, "status_text"),
        remark: str_field(data, "remark"),
        create_at: str_field(data, "create_at"),
        update_at: str_field(data, "update_at"),
        pay_address: str_field(data, "pay_address"),
    })
}
