use std::time::Duration;

use async_openai::{
    config::AzureConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::{
    config::Config,
    constants::prompts,
    errors::{AppError, AppResult},
    models::domain::GenerationRequest,
    services::video_service,
};

/// Raw output of a generation backend, before any repair: either free text
/// that should parse as JSON, or an already-parsed value.
#[derive(Clone, Debug)]
pub enum RawGeneration {
    Text(String),
    Json(Value),
}

/// The external generative backend. Constructed once at process start and
/// injected as a shared handle; implementations own their connection
/// lifecycle, internal timeouts and retry policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<RawGeneration>;
}

/// Azure OpenAI chat-completion backend.
pub struct OpenAiBackend {
    client: Client<AzureConfig>,
    deployment: String,
    model_timeout: Duration,
    max_retries: u32,
}

impl OpenAiBackend {
    pub fn from_config(config: &Config) -> Self {
        let azure = AzureConfig::new()
            .with_api_base(&config.azure_api_base)
            .with_api_key(config.azure_api_key.expose_secret())
            .with_deployment_id(&config.azure_deployment_name)
            .with_api_version(&config.azure_api_version);

        log::info!(
            "Azure OpenAI client initialized - deployment: {}, api version: {}",
            config.azure_deployment_name,
            config.azure_api_version
        );

        Self {
            client: Client::with_config(azure),
            deployment: config.azure_deployment_name.clone(),
            model_timeout: Duration::from_secs(config.model_timeout_seconds),
            max_retries: config.model_max_retries,
        }
    }

    async fn invoke_model(&self, prompt: &str) -> AppResult<String> {
        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(self.deployment.clone())
            .temperature(0.7)
            .max_tokens(4000u32)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let mut last_error = AppError::GenerationFailed("model produced no output".to_string());

        for attempt in 1..=self.max_retries {
            match tokio::time::timeout(
                self.model_timeout,
                self.client.chat().create(chat_request.clone()),
            )
            .await
            {
                Ok(Ok(response)) => {
                    let content = response
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|choice| choice.message.content);
                    match content {
                        Some(content) => return Ok(content),
                        None => {
                            last_error = AppError::GenerationFailed(
                                "model returned an empty completion".to_string(),
                            );
                        }
                    }
                }
                Ok(Err(err)) => {
                    log::warn!("model call attempt {attempt}/{} failed: {err}", self.max_retries);
                    last_error = AppError::from(err);
                }
                Err(_) => {
                    log::warn!(
                        "model call attempt {attempt}/{} exceeded {}s",
                        self.max_retries,
                        self.model_timeout.as_secs()
                    );
                    last_error = AppError::GenerationFailed(format!(
                        "model call exceeded the {}s connector budget",
                        self.model_timeout.as_secs()
                    ));
                }
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<RawGeneration> {
        let prompt = prompts::render_mcq_prompt(request);
        let content = self.invoke_model(&prompt).await?;

        let content = video_service::expand_video_placeholder(
            content,
            &request.topic,
            request.include_videos,
        );

        Ok(RawGeneration::Text(content))
    }
}
