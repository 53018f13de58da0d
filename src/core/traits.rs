use crate::core::{
    errors::MbPayError,
    types::{
        BalanceResponse, OrderInfoResponse, PayOrderInfoResponse, PayRequest, PayResponse,
        PaymentLinkRequest, PaymentOrderRequest, PaymentOrderResponse,
    },
};
use async_trait::async_trait;

/// Every operation the platform offers a merchant.
///
/// Inputs are validated before anything is sent; a rejected input returns
/// [`MbPayError::Validation`] without touching the network.
#[async_trait]
pub trait MerchantApi: Send + Sync {
    /// Available and frozen balance
    async fn get_balance(&self) -> Result<BalanceResponse, MbPayError>;

    /// Pay out from the merchant balance to a user address
    async fn pay(&self, request: PayRequest) -> Result<PayResponse, MbPayError>;

    /// Build a signed `mbpay://payorder?data=...` link, typically rendered as a QR code.
    /// No request is sent.
    async fn generate_payment_link(
        &self,
        request: PaymentLinkRequest,
    ) -> Result<String, MbPayError>;

    /// Create a hosted checkout order and return its page URL
    async fn create_payment_order(
        &self,
        request: PaymentOrderRequest,
    ) -> Result<PaymentOrderResponse, MbPayError>;

    /// Look up a checkout order by merchant order number
    async fn get_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<OrderInfoResponse, MbPayError>;

    /// Look up a payout by merchant order number
    async fn get_pay_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<PayOrderInfoResponse, MbPayError>;
}
