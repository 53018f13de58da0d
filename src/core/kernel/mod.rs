/// `MBPay` Kernel - signing and transport shared by every merchant call
///
/// The kernel contains no endpoint knowledge. It is organized around two seams:
///
/// ## Authentication
/// - `Signer`: turns a parameter mapping into a `SignedRequest`
/// - `MbPaySigner`: keyed SHA-256 (platform default) or HMAC-SHA256
///
/// ## Transport
/// - `Transport`: sends one signed request and returns the raw body
/// - `ReqwestRest`: reqwest-backed implementation with a configurable timeout
///
/// # Example
/// ```rust,no_run
/// use mbpay::core::kernel::*;
/// use secrecy::Secret;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = MbPaySigner::new(
///     Credentials::new("1001", Secret::new("app_secret".to_string())),
///     SignatureScheme::KeyedSha256,
/// );
/// let rest = RestClientBuilder::new(
///     RestClientConfig::new("https://www.mbpay.world".to_string()).with_timeout(10),
/// )
/// .build()?;
///
/// let signed = signer.sign_now("/merchant/balance", Params::new())?;
/// let body = rest
///     .send(reqwest::Method::POST, &signed.path, &signed.form_pairs())
///     .await?;
/// # let _ = body;
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClientBuilder, RestClientConfig, Transport};
pub use signer::{
    canonicalize, generate_nonce, parse_canonical, unix_timestamp, Credentials, MbPaySigner,
    Params, SignatureScheme, SignedRequest, Signer,
};
