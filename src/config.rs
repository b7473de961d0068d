use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub azure_api_key: SecretString,
    pub azure_api_base: String,
    pub azure_deployment_name: String,
    pub azure_api_version: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Overall budget for one generation request, enforced by the orchestrator.
    pub request_timeout_seconds: u64,
    /// Per-call budget for a single model invocation inside the backend.
    pub model_timeout_seconds: u64,
    pub model_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            azure_api_key: SecretString::from(
                env::var("AZURE_API_KEY").unwrap_or_else(|_| "azure_api_key".to_string()),
            ),
            azure_api_base: env::var("AZURE_API_BASE")
                .unwrap_or_else(|_| "https://localhost:8443".to_string()),
            azure_deployment_name: env::var("AZURE_DEPLOYMENT_NAME")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            azure_api_version: env::var("AZURE_API_VERSION")
                .unwrap_or_else(|_| "2025-01-01-preview".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(120),
            model_timeout_seconds: env::var("MODEL_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(60),
            model_max_retries: env::var("MODEL_MAX_RETRIES")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.azure_api_key.expose_secret() == "azure_api_key" {
            panic!(
                "FATAL: AZURE_API_KEY is using default value! Set AZURE_API_KEY environment variable."
            );
        }

        if !self.azure_api_base.starts_with("http://") && !self.azure_api_base.starts_with("https://")
        {
            panic!("FATAL: AZURE_API_BASE must be a URL starting with http:// or https://");
        }

        if self.azure_deployment_name.trim().is_empty() {
            panic!("FATAL: AZURE_DEPLOYMENT_NAME must not be empty");
        }

        if self.request_timeout_seconds == 0 || self.model_timeout_seconds == 0 {
            panic!("FATAL: REQUEST_TIMEOUT and MODEL_TIMEOUT must be positive");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            azure_api_key: SecretString::from("test_api_key".to_string()),
            azure_api_base: "https://test.openai.azure.com".to_string(),
            azure_deployment_name: "gpt-4o".to_string(),
            azure_api_version: "2025-01-01-preview".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            request_timeout_seconds: 120,
            model_timeout_seconds: 60,
            model_max_retries: 3,
        }
    }
}
