pub mod builder;
pub mod connector;
pub mod conversions;
pub mod payment_link;
pub mod rest;
pub mod validation;

// Re-export main types for easier importing
pub use builder::{build_client, build_client_with_transport};
pub use connector::MerchantClient;
pub use payment_link::{
    decode_payment_link, verify_payment_link, PaymentLinkPayload, PAYMENT_LINK_PREFIX,
};
pub use rest::MerchantRest;
