use crate::core::errors::MbPayError;
use crate::core::types::{PayRequest, PaymentLinkRequest, PaymentOrderRequest};

fn require_non_empty(field: &str, value: &str) -> Result<(), MbPayError> {
    if value.is_empty() {
        return Err(MbPayError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_positive(field: &str, value: i64) -> Result<(), MbPayError> {
    if value <= 0 {
        return Err(MbPayError::validation(format!(
            "{} must be greater than 0",
            field
        )));
    }
    Ok(())
}

fn require_merchant_id(merchant_id: i64) -> Result<(), MbPayError> {
    if merchant_id <= 0 {
        return Err(MbPayError::validation(
            "merchant_id is required and must be greater than 0",
        ));
    }
    Ok(())
}

pub fn validate_pay_request(request: &PayRequest) -> Result<(), MbPayError> {
    require_non_empty("address", &request.address)?;
    require_non_empty("order_no", &request.order_no)?;
    require_positive("amount", request.amount)
}

pub fn validate_payment_link_request(request: &PaymentLinkRequest) -> Result<(), MbPayError> {
    require_non_empty("order_no", &request.order_no)?;
    require_non_empty("subject", &request.subject)?;
    require_positive("amount", request.amount)?;
    require_positive("expire", request.expire)
}

pub fn validate_payment_order_request(request: &PaymentOrderRequest) -> Result<(), MbPayError> {
    require_merchant_id(request.merchant_id)?;
    require_non_empty("order_no", &request.order_no)?;
    require_non_empty("subject", &request.subject)?;
    require_positive("amount", request.amount)?;
    require_non_empty("notify_url", &request.notify_url)
}

/// Shared by both order lookups
pub fn validate_order_query(order_no: &str, merchant_id: i64) -> Result<(), MbPayError> {
    require_non_empty("order_no", order_no)?;
    require_merchant_id(merchant_id)
}
