use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    services::{
        generation_service::GenerationService,
        model_service::{GenerationBackend, OpenAiBackend},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the process-wide state. The backend client is constructed
    /// exactly once here and shared by handle; the core never reconstructs
    /// it per request.
    pub fn new(config: Config) -> Self {
        let backend = Arc::new(OpenAiBackend::from_config(&config));
        Self::with_backend(backend, config)
    }

    pub fn with_backend(backend: Arc<dyn GenerationBackend>, config: Config) -> Self {
        let generation_service = Arc::new(GenerationService::new(
            backend,
            Duration::from_secs(config.request_timeout_seconds),
        ));

        Self {
            generation_service,
            config: Arc::new(config),
        }
    }
}
