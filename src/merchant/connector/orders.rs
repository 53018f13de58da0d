use crate::core::errors::MbPayError;
use crate::core::kernel::{Params, Transport};
use crate::core::types::{OrderInfoResponse, PayOrderInfoResponse};
use crate::merchant::conversions::{convert_order_info, convert_pay_order_info};
use crate::merchant::rest::MerchantRest;
use crate::merchant::validation::validate_order_query;
use tracing::instrument;

/// Order lookups
#[derive(Clone)]
pub struct Orders<T: Transport> {
    rest: MerchantRest<T>,
}

impl<T: Transport + Clone> Orders<T> {
    pub fn new(rest: &MerchantRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

fn query_params(order_no: &str, merchant_id: i64) -> Params {
    let mut params = Params::new();
    params.insert("order_no".to_string(), order_no.to_string());
    params.insert("merchant_id".to_string(), merchant_id.to_string());
    params
}

impl<T: Transport> Orders<T> {
    #[instrument(skip(self))]
    pub async fn get_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<OrderInfoResponse, MbPayError> {
        validate_order_query(order_no, merchant_id)?;
        let data = self
            .rest
            .order_info(query_params(order_no, merchant_id))
            .await?;
        convert_order_info(&data)
    }

    #[instrument(skip(self))]
    pub async fn get_pay_order_info(
        &self,
        order_no: &str,
        merchant_id: i64,
    ) -> Result<PayOrderInfoResponse, MbPayError> {
        validate_order_query(order_no, merchant_id)?;
        let data = self
            .rest
            .pay_order_info(query_params(order_no, merchant_id))
            .await?;
        convert_pay_order_info(&data)
    }
}
