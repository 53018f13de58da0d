use crate::core::errors::MbPayError;
use crate::core::kernel::{unix_timestamp, Params, Transport};
use crate::core::types::{PaymentLinkRequest, PaymentOrderRequest, PaymentOrderResponse};
use crate::merchant::conversions::convert_payment_order;
use crate::merchant::payment_link::build_payment_link;
use crate::merchant::rest::MerchantRest;
use crate::merchant::validation::validate_payment_order_request;
use tracing::{debug, instrument};

/// Payment links and hosted checkout orders
#[derive(Clone)]
pub struct Payments<T: Transport> {
    rest: MerchantRest<T>,
}

impl<T: Transport + Clone> Payments<T> {
    pub fn new(rest: &MerchantRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<T: Transport> Payments<T> {
    /// Built locally; no request reaches the platform
    #[instrument(skip(self, request), fields(order_no = %request.order_no, amount = request.amount))]
    pub fn generate_payment_link(&self, request: &PaymentLinkRequest) -> Result<String, MbPayError> {
        let link = build_payment_link(self.rest.signer(), request, unix_timestamp())?;
        debug!(link_len = link.len(), "payment link generated");
        Ok(link)
    }

    #[instrument(skip(self, request), fields(order_no = %request.order_no, merchant_id = request.merchant_id))]
    pub async fn create_payment_order(
        &self,
        request: PaymentOrderRequest,
    ) -> Result<PaymentOrderResponse, MbPayError> {
        validate_payment_order_request(&request)?;

        let mut params = Params::new();
        params.insert("merchant_id".to_string(), request.merchant_id.to_string());
        params.insert("order_no".to_string(), request.order_no);
        params.insert("subject".to_string(), request.subject);
        params.insert("amount".to_string(), request.amount.to_string());
        params.insert("notify_url".to_string(), request.notify_url);

        let data = self.rest.create_payment_order(params).await?;
        convert_payment_order(&data)
    }
}
