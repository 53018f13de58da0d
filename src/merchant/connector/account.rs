use crate::core::errors::MbPayError;
use crate::core::kernel::{Params, Transport};
use crate::core::types::{BalanceResponse, PayRequest, PayResponse};
use crate::merchant::conversions::{convert_balance, convert_pay_response};
use crate::merchant::rest::MerchantRest;
use crate::merchant::validation::validate_pay_request;
use tracing::instrument;

/// Balance queries and payouts
#[derive(Clone)]
pub struct Account<T: Transport> {
    rest: MerchantRest<T>,
}

impl<T: Transport + Clone> Account<T> {
    pub fn new(rest: &MerchantRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

impl<T: Transport> Account<T> {
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> Result<BalanceResponse, MbPayError> {
        let data = self.rest.balance().await?;
        convert_balance(&data)
    }

    #[instrument(skip(self, request), fields(order_no = %request.order_no, amount = request.amount))]
    pub async fn pay(&self, request: PayRequest) -> Result<PayResponse, MbPayError> {
        validate_pay_request(&request)?;

        let mut params = Params::new();
        params.insert("address".to_string(), request.address);
        params.insert("order_no".to_string(), request.order_no);
        params.insert("amount".to_string(), request.amount.to_string());
        if let Some(remark) = request.remark.filter(|r| !r.is_empty()) {
            params.insert("remark".to_string(), remark);
        }

        let data = self.rest.pay(params).await?;
        convert_pay_response(&data)
    }
}
