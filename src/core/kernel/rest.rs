use crate::core::config::{ClientConfig, ConfigError, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::core::errors::MbPayError;
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use std::time::Duration;
use tracing::{instrument, trace};

/// Transport trait for moving one signed request over the wire
///
/// Implementations send the parameters exactly once and hand back the raw response
/// body. Decoding the body is the caller's job, so that malformed bodies surface as
/// decode errors rather than transport errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request
    ///
    /// # Arguments
    /// * `method` - HTTP method; `GET` puts params in the query string, anything else
    ///   sends them as an `application/x-www-form-urlencoded` body
    /// * `endpoint` - API path appended to the base URL
    /// * `params` - Fully signed parameters
    ///
    /// # Returns
    /// The response body as text
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, MbPayError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

impl From<&ClientConfig> for RestClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
            .with_timeout(config.timeout_seconds)
            .with_user_agent(config.user_agent.clone())
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, MbPayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `Transport` using reqwest
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn new(base_url: String) -> Result<Self, MbPayError> {
        RestClientBuilder::new(RestClientConfig::new(base_url)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn map_send_error(err: &reqwest::Error) -> MbPayError {
        if err.is_timeout() {
            MbPayError::Transport(format!("Request timeout: {}", err))
        } else {
            MbPayError::Transport(format!("Request failed: {}", err))
        }
    }

    /// Read the body, rejecting any non-2xx status
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<String, MbPayError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            MbPayError::Transport(format!("Failed to read response body: {}", e))
        })?;

        trace!(body_len = body.len(), "response received");

        if status.is_success() {
            Ok(body)
        } else {
            Err(MbPayError::Transport(format!("HTTP status {}", status.as_u16())))
        }
    }
}

#[async_trait]
impl Transport for ReqwestRest {
    #[instrument(skip(self, params), fields(method = %method, endpoint = %endpoint, param_count = params.len()))]
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<String, MbPayError> {
        let url = self.build_url(endpoint);
        let request = if method == Method::GET {
            self.client.get(&url).query(params)
        } else {
            self.client.request(method, &url).form(params)
        };

        let response = request
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        self.handle_response(response).await
    }
}
