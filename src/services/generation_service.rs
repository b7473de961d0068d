use std::{sync::Arc, time::Duration};

use serde_json::{json, Value};
use tokio::time::Instant;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::GenerationResponse, dto::GenerateMcqRequest},
    services::{
        metadata_service,
        model_service::GenerationBackend,
        repair_service::{self, RepairOptions},
        request_service,
    },
};

/// Orchestrates one generation request: normalize, call the backend under
/// the overall timeout budget, repair the raw output, synthesize metadata
/// and assemble the final response. Holds no per-request state; the backend
/// handle is the only shared dependency.
pub struct GenerationService {
    backend: Arc<dyn GenerationBackend>,
    request_timeout: Duration,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn GenerationBackend>, request_timeout: Duration) -> Self {
        Self {
            backend,
            request_timeout,
        }
    }

    pub async fn generate(&self, dto: GenerateMcqRequest) -> AppResult<GenerationResponse> {
        let request = request_service::normalize(dto)?;
        log::info!(
            "MCQ generation requested - user: {}, topic: {}, difficulty: {}, count: {}",
            request.username,
            request.topic,
            request.difficulty,
            request.question_count
        );

        let started = Instant::now();
        // The in-flight call is abandoned on expiry, never awaited further.
        let raw = match tokio::time::timeout(self.request_timeout, self.backend.generate(&request))
            .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => return Err(err),
            Err(_) => {
                return Err(AppError::Timeout(format!(
                    "generation backend did not respond within {}s",
                    self.request_timeout.as_secs()
                )))
            }
        };

        let options = RepairOptions::from(&request);
        let (mut repaired, report) = repair_service::repair(&raw, &options)?;
        if report.has_corrections() {
            log::warn!(
                "repaired generation payload for user '{}': {}",
                request.username,
                report.summary()
            );
        }

        let mut metadata = metadata_service::synthesize(&repaired);
        let elapsed = round_seconds(started.elapsed());
        metadata.insert("generation_time_seconds".to_string(), json!(elapsed));

        // Echo the request identity rather than trusting the model's copy.
        repaired.insert("username".to_string(), json!(request.username));
        repaired.insert("topic".to_string(), json!(request.topic));
        repaired.insert("metadata".to_string(), Value::Object(metadata));

        let response: GenerationResponse = serde_json::from_value(Value::Object(repaired))
            .map_err(|err| {
                AppError::GenerationFailed(format!(
                    "repaired payload failed schema validation: {err}"
                ))
            })?;

        log::info!(
            "generated content in {elapsed}s - questions: {}, roadmap steps: {}, videos: {}",
            response.questions.len(),
            response.roadmap.as_ref().map_or(0, Vec::len),
            response.reference_videos.as_ref().map_or(0, Vec::len)
        );

        Ok(response)
    }
}

fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
