//! Calls against a real MBPay deployment.
//!
//! Skipped unless `RUN_LIVE_TESTS=true` and `MBPAY_BASE_URL`, `MBPAY_APP_ID` and
//! `MBPAY_APP_SECRET` are set.

mod common;

use mbpay::{ClientConfig, MerchantApi, MerchantClient};
use std::time::Duration;
use tokio::time::timeout;

fn live_client() -> Option<MerchantClient<mbpay::core::kernel::ReqwestRest>> {
    if !common::should_run_live_tests() {
        println!("⚠️ Skipping live test (set RUN_LIVE_TESTS=true to enable)");
        return None;
    }
    let config = ClientConfig::from_env("MBPAY").ok()?;
    MerchantClient::from_config(&config).ok()
}

#[tokio::test]
async fn test_live_balance() {
    let Some(client) = live_client() else {
        return;
    };

    match timeout(Duration::from_secs(30), client.get_balance()).await {
        Ok(Ok(balance)) => {
            println!("✅ balance={} frozen={}", balance.balance, balance.frozen);
            assert!(balance.balance >= 0);
        }
        Ok(Err(e)) => println!("⚠️ balance call failed: {}", e),
        Err(_) => println!("⚠️ balance call timed out"),
    }
}

#[tokio::test]
async fn test_live_unknown_order_is_business_error() {
    let Some(client) = live_client() else {
        return;
    };

    let result = timeout(
        Duration::from_secs(30),
        client.get_pay_order_info("mbpay-rust-no-such-order", 1),
    )
    .await;

    if let Ok(Err(e)) = result {
        println!("ℹ️ {}", e);
        assert!(e.is_business() || e.is_transport());
    }
}
