use crate::core::errors::MbPayError;
use crate::core::kernel::{Params, SignedRequest, Signer, Transport};
use crate::core::types::ResponseEnvelope;
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const BALANCE_PATH: &str = "/merchant/balance";
pub const PAY_PATH: &str = "/merchant/pay";
pub const PAYMENT_ORDER_PATH: &str = "/merchant/generatepaylink";
pub const ORDER_INFO_PATH: &str = "/merchant/orderinfo";
pub const PAY_ORDER_INFO_PATH: &str = "/merchant/payorderinfo";

/// Request executor for the merchant API
///
/// Signs, sends exactly once, decodes the envelope and turns non-zero codes into
/// business errors. Only the `data` payload of successful calls leaves this type.
pub struct MerchantRest<T: Transport> {
    transport: T,
    signer: Arc<dyn Signer>,
}

impl<T: Transport + Clone> Clone for MerchantRest<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            signer: Arc::clone(&self.signer),
        }
    }
}

impl<T: Transport> MerchantRest<T> {
    pub fn new(transport: T, signer: Arc<dyn Signer>) -> Self {
        Self { transport, signer }
    }

    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sign `params` with the current time and a fresh nonce, then send them
    #[instrument(skip(self, params), fields(path = %path, param_count = params.len()))]
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<Map<String, Value>, MbPayError> {
        let signed = self.signer.sign_now(path, params)?;
        self.send_signed(method, &signed).await
    }

    /// Send an already signed request and unwrap its envelope
    pub async fn send_signed(
        &self,
        method: Method,
        signed: &SignedRequest,
    ) -> Result<Map<String, Value>, MbPayError> {
        debug!(
            path = %signed.path,
            timestamp = signed.timestamp,
            "sending signed request"
        );

        let body = self
            .transport
            .send(method, &signed.path, &signed.form_pairs())
            .await?;

        let envelope = ResponseEnvelope::from_body(&body).map_err(|e| {
            warn!(path = %signed.path, error = %e, "undecodable response body");
            e
        })?;

        envelope.into_result().map_err(|err| {
            warn!(
                path = %signed.path,
                code = err.code(),
                message = %err.message(),
                "platform rejected request"
            );
            err
        })
    }

    pub async fn balance(&self) -> Result<Map<String, Value>, MbPayError> {
        self.execute(Method::POST, BALANCE_PATH, Params::new()).await
    }

    pub async fn pay(&self, params: Params) -> Result<Map<String, Value>, MbPayError> {
        self.execute(Method::POST, PAY_PATH, params).await
    }

    pub async fn create_payment_order(
        &self,
        params: Params,
    ) -> Result<Map<String, Value>, MbPayError> {
        self.execute(Method::POST, PAYMENT_ORDER_PATH, params).await
    }

    pub async fn order_info(&self, params: Params) -> Result<Map<String, Value>, MbPayError> {
        self.execute(Method::POST, ORDER_INFO_PATH, params).await
    }

    pub async fn pay_order_info(&self, params: Params) -> Result<Map<String, Value>, MbPayError> {
        self.execute(Method::POST, PAY_ORDER_INFO_PATH, params).await
    }
}
