pub mod core;
pub mod merchant;

pub use crate::core::{
    config::ClientConfig,
    errors::{ErrorCode, MbPayError},
    traits::MerchantApi,
    types::*,
};
pub use merchant::{build_client, MerchantClient};
