#![allow(dead_code)]

use async_trait::async_trait;
use mbpay::core::kernel::{Params, Transport};
use mbpay::merchant::build_client_with_transport;
use mbpay::{ClientConfig, MbPayError, MerchantClient};
use reqwest::Method;
use std::env;
use std::sync::{Arc, Mutex};

pub const APP_ID: &str = "1001";
pub const APP_SECRET: &str = "test_app_secret";

/// One request as the transport saw it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub params: Params,
}

/// In-memory transport that records every call and replies with a fixed body
#[derive(Clone)]
pub struct RecordingTransport {
    reply: Arc<Result<String, String>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingTransport {
    pub fn replying(body: &str) -> Self {
        Self {
            reply: Arc::new(Ok(body.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Arc::new(Err(message.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, MbPayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            params: params.iter().cloned().collect(),
        });
        self.reply.as_ref().clone().map_err(MbPayError::Transport)
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new(
        "https://mbpay.test".to_string(),
        APP_ID.to_string(),
        APP_SECRET.to_string(),
    )
}

pub fn client_replying(body: &str) -> (MerchantClient<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::replying(body);
    (
        build_client_with_transport(&test_config(), transport.clone()),
        transport,
    )
}

/// Check if live API tests should run (requires real credentials)
pub fn should_run_live_tests() -> bool {
    env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
}
