use crate::core::config::ClientConfig;
use crate::core::errors::MbPayError;
use crate::core::kernel::{
    Credentials, MbPaySigner, ReqwestRest, RestClientBuilder, RestClientConfig, Transport,
};
use crate::merchant::connector::MerchantClient;
use std::sync::Arc;
use tracing::debug;

fn build_signer(config: &ClientConfig) -> MbPaySigner {
    MbPaySigner::new(
        Credentials::new(config.app_id.clone(), config.app_secret.clone()),
        config.sign_scheme,
    )
}

/// Create a merchant client backed by reqwest
pub fn build_client(config: &ClientConfig) -> Result<MerchantClient<ReqwestRest>, MbPayError> {
    config.validate()?;

    let rest = RestClientBuilder::new(RestClientConfig::from(config)).build()?;
    debug!(
        base_url = %config.base_url,
        app_id = %config.app_id,
        timeout_seconds = config.timeout_seconds,
        "merchant client created"
    );

    Ok(MerchantClient::new(rest, Arc::new(build_signer(config))))
}

/// Create a merchant client over a caller-supplied transport
///
/// The transport decides where requests go; `config.base_url` and the timeout are not used.
pub fn build_client_with_transport<T: Transport + Clone>(
    config: &ClientConfig,
    transport: T,
) -> MerchantClient<T> {
    MerchantClient::new(transport, Arc::new(build_signer(config)))
}

impl MerchantClient<ReqwestRest> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, MbPayError> {
        build_client(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_validates_config() {
        let bad = ClientConfig::new("mbpay.world".into(), "1001".into(), "s".into());
        let err = build_client(&bad).err().unwrap();
        assert!(matches!(err, MbPayError::Config(_)));
    }

    #[test]
    fn test_build_client_from_valid_config() {
        let config = ClientConfig::new(
            "https://www.mbpay.world".into(),
            "1001".into(),
            "s".into(),
        )
        .with_timeout(10);
        assert!(MerchantClient::from_config(&config).is_ok());
    }
}
