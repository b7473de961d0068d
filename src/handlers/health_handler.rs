use std::collections::BTreeMap;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::json;

use crate::{
    app_state::AppState,
    models::domain::request::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT},
};

const SERVICE_NAME: &str = "MCQ Generator API";

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub dependencies: BTreeMap<&'static str, String>,
}

#[get("/api/v1/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut dependencies = BTreeMap::new();

    let azure_status = if state.config.azure_api_key.expose_secret() == "azure_api_key" {
        "error: AZURE_API_KEY not configured".to_string()
    } else {
        "configured".to_string()
    };
    dependencies.insert("azure_openai", azure_status);

    let degraded = dependencies.values().any(|status| status.starts_with("error"));
    let response = HealthCheckResponse {
        status: if degraded { "degraded" } else { "healthy" },
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
        dependencies,
    };

    if degraded {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

/// Lightweight readiness probe for load balancers
#[get("/api/v1/health/ready")]
async fn readiness_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ready",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[get("/api/v1/health/live")]
async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "alive",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[get("/api/v1/generate-mcq/stats")]
async fn generation_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service_info": {
            "name": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "min_questions_per_request": MIN_QUESTION_COUNT,
            "max_questions_per_request": MAX_QUESTION_COUNT,
            "default_question_count": DEFAULT_QUESTION_COUNT,
            "supported_difficulties": ["basic", "intermediate", "advanced", "mixed"],
            "features": [
                "Multiple Choice Questions",
                "Learning Roadmaps",
                "Reference Videos",
                "Detailed Explanations",
            ],
        },
        "performance": {
            "timeout_limit_seconds": state.config.request_timeout_seconds,
            "model_timeout_seconds": state.config.model_timeout_seconds,
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
