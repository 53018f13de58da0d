use crate::core::kernel::signer::SignatureScheme;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "mbpay-rust/0.1";

/// Everything needed to construct a merchant client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_secret: Secret<String>,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub sign_scheme: SignatureScheme,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ClientConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ClientConfig", 6)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("app_id", &self.app_id)?;
        state.serialize_field("app_secret", "[REDACTED]")?;
        state.serialize_field("timeout_seconds", &self.timeout_seconds)?;
        state.serialize_field("user_agent", &self.user_agent)?;
        state.serialize_field("sign_scheme", &self.sign_scheme)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ClientConfigHelper {
            base_url: String,
            app_id: String,
            app_secret: String,
            #[serde(default = "default_timeout")]
            timeout_seconds: u64,
            #[serde(default = "default_user_agent")]
            user_agent: String,
            #[serde(default)]
            sign_scheme: SignatureScheme,
        }

        let helper = ClientConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            base_url: normalize_base_url(&helper.base_url),
            app_id: helper.app_id,
            app_secret: Secret::new(helper.app_secret),
            timeout_seconds: helper.timeout_seconds,
            user_agent: helper.user_agent,
            sign_scheme: helper.sign_scheme,
        })
    }
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

impl ClientConfig {
    /// Create a configuration with the platform defaults (30 s timeout, keyed SHA-256 signing)
    ///
    /// A trailing `/` on `base_url` is dropped so paths can be appended directly.
    #[must_use]
    pub fn new(base_url: String, app_id: String, app_secret: String) -> Self {
        Self {
            base_url: normalize_base_url(&base_url),
            app_id,
            app_secret: Secret::new(app_secret),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: default_user_agent(),
            sign_scheme: SignatureScheme::default(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_BASE_URL` (e.g., `MBPAY_BASE_URL`)
    /// - `{PREFIX}_APP_ID`
    /// - `{PREFIX}_APP_SECRET`
    /// - `{PREFIX}_TIMEOUT_SECS` (optional, defaults to 30)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let base_url = required_var(&format!("{}_BASE_URL", prefix))?;
        let app_id = required_var(&format!("{}_APP_ID", prefix))?;
        let app_secret = required_var(&format!("{}_APP_SECRET", prefix))?;

        let timeout_var = format!("{}_TIMEOUT_SECS", prefix);
        let timeout_seconds = match env::var(&timeout_var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} must be an integer: {}", timeout_var, e))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self::new(base_url, app_id, app_secret).with_timeout(timeout_seconds))
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    ///
    /// A missing file is not an error; system environment variables are used instead.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Set the HTTP timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    #[must_use]
    pub const fn with_sign_scheme(mut self, sign_scheme: SignatureScheme) -> Self {
        self.sign_scheme = sign_scheme;
        self
    }

    /// Check that both halves of the credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.app_secret.expose_secret().is_empty()
    }

    /// Check the settings that can be checked without touching the network
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidConfiguration(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidConfiguration(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get app secret (use carefully - exposes secret)
    pub fn app_secret(&self) -> &str {
        self.app_secret.expose_secret()
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvironmentVariable(name.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(
            "https://www.mbpay.world/".to_string(),
            "app-1".to_string(),
            "top-secret".to_string(),
        )
    }

    #[test]
    fn test_trailing_slash_is_removed() {
        assert_eq!(config().base_url, "https://www.mbpay.world");
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.sign_scheme, SignatureScheme::KeyedSha256);
        assert!(config.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_secret_never_serialized_or_debug_printed() {
        let config = config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("top-secret"));
        assert!(json.contains("[REDACTED]"));
        assert!(!format!("{:?}", config).contains("top-secret"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_url":"https://api.example.com/","app_id":"a","app_secret":"s"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.app_secret(), "s");
    }

    #[test]
    fn test_validate_rejects_bad_urls_and_zero_timeout() {
        let bad = ClientConfig::new("not a url".into(), "a".into(), "s".into());
        assert!(bad.validate().is_err());

        let ftp = ClientConfig::new("ftp://example.com".into(), "a".into(), "s".into());
        assert!(ftp.validate().is_err());

        let zero = config().with_timeout(0);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_missing_credentials_detected() {
        let config = ClientConfig::new("https://x.example".into(), String::new(), "s".into());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_from_env_reports_missing_variable() {
        let err = ClientConfig::from_env("MBPAY_TEST_UNSET_PREFIX").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvironmentVariable(name) if name == "MBPAY_TEST_UNSET_PREFIX_BASE_URL"));
    }
}
