use anyhow::Context;
use mbpay::{ClientConfig, MerchantApi, MerchantClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Reads MBPAY_BASE_URL, MBPAY_APP_ID, MBPAY_APP_SECRET and optionally MBPAY_TIMEOUT_SECS
    #[cfg(feature = "env-file")]
    let config = ClientConfig::from_env_file("MBPAY")?;
    #[cfg(not(feature = "env-file"))]
    let config = ClientConfig::from_env("MBPAY")?;

    let client = MerchantClient::from_config(&config)?;

    println!("Fetching merchant balance...");
    let balance = client
        .get_balance()
        .await
        .context("balance query failed")?;
    println!(
        "Available: {}, frozen: {}",
        balance.balance, balance.frozen
    );

    Ok(())
}
