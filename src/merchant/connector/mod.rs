use crate::core::errors::MbPayError;
use crate::core::kernel::{Signer, Transport};
use crate::core::traits::MerchantApi;
use crate::core::types::{
    BalanceResponse, OrderInfoResponse, PayOrderInfoResponse, PayRequest, PayResponse,
    PaymentLinkRequest, PaymentOrderRequest, PaymentOrderResponse,
};
use crate::merchant::rest::MerchantRest;
use async_trait::async_trait;
use std::sync::Arc;

pub mod account;
pub mod orders;
pub mod payments;

pub use account::Account;
pub use orders::Orders;
pub use payments::Payments;

/// MBPay merchant client that composes the per-area implementations
///
/// Holds nothing mutable; share it freely between tasks.
#[derive(Clone)]
pub struct MerchantClient<T: Transport> {
    pub account: Account<T>,
    pub payments: Payments<T>,
    pub orders: Orders<T>,
}

impl<T: Transport + Clone> MerchantClient<T> {
    pub fn new(transport: T, signer: Arc<dyn Signer>) -> Self {
        Self::with_rest(&MerchantRest::new(transport, signer))
    }

    pub fn with_rest(rest: &MerchantRest<T>) -> Self {
        Self {
            account: Account::new(rest),
            payments: Payments::new(rest),
            orders: Orders::new(rest),
        }
    }
}

// Implement the trait by delegating to sub-components
#[async_trait]
impl<T: Transport + 'static> MerchantApi for MerchantClient<T> {
    async fn get_balance(&self) -> Result<BalanceResponse, MbPayError> {
        self.account.get_balance().await
    }

    async fn pay(&self, request: PayRequest) -> Result<PayResponse, MbPayError> {
        self.account.pay(request).await
    }

    async fn generate_payment_link(
        &self,
        request: PaymentLinkRequest,
    ) -> Result<String, MbPayError> {
        self.payments.generate_payment_link(&request)
    }

    async fn create_payment_order(
        &self,
        request: PaymentOrderRequest,
    ) -> Result<PaymentOrderResponse, MbPayError> {
        self.payments.create_payment_order(request).await
    }

    async fn get_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<OrderInfoResponse, MbPayError> {
        self.orders.get_order_info(order_no, merchant_id).await
    }

    async fn get_pay_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<PayOrderInfoResponse, MbPayError> {
        self.orders.get_pay_order_info(order_no, merchant_id).await
    }
}
