use std::{sync::Arc, time::Duration};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use mcqgen_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    handlers,
    models::domain::{GenerationRequest, GenerationResponse},
    services::{
        generation_service::GenerationService,
        model_service::{GenerationBackend, RawGeneration},
    },
};

struct StaticBackend(Value);

#[async_trait]
impl GenerationBackend for StaticBackend {
    async fn generate(&self, _request: &GenerationRequest) -> AppResult<RawGeneration> {
        Ok(RawGeneration::Json(self.0.clone()))
    }
}

struct TextBackend(String);

#[async_trait]
impl GenerationBackend for TextBackend {
    async fn generate(&self, _request: &GenerationRequest) -> AppResult<RawGeneration> {
        Ok(RawGeneration::Text(self.0.clone()))
    }
}

fn service_for(backend: impl GenerationBackend + 'static) -> GenerationService {
    GenerationService::new(Arc::new(backend), Duration::from_secs(5))
}

fn request_json(username: &str, topic: &str) -> Value {
    json!({"username": username, "topic": topic})
}

fn request(username: &str, topic: &str) -> mcqgen_server::models::dto::GenerateMcqRequest {
    serde_json::from_value(request_json(username, topic)).expect("request should deserialize")
}

#[actix_web::test]
async fn end_to_end_repair_of_a_degenerate_payload() {
    let payload = json!({
        "username": "a",
        "topic": "b",
        "questions": [{
            "question_text": "Q?",
            "explanation": "E",
            "options": [
                {"option": "A", "is_correct": true},
                {"option": "B", "is_correct": true}
            ],
            "difficulty": "basic"
        }]
    });

    let response = service_for(StaticBackend(payload))
        .generate(request("alice", "databases"))
        .await
        .expect("repair should salvage the payload");

    assert_eq!(response.questions.len(), 1);
    let question = &response.questions[0];

    assert_eq!(question.question_id, 1);
    assert_eq!(question.topic_area, "General");
    assert_eq!(question.options.len(), 4);

    // The first originally-correct option wins; the synthesized ones are false
    let correct: Vec<&str> = question
        .options
        .iter()
        .filter(|o| o.is_correct)
        .map(|o| o.option.as_str())
        .collect();
    assert_eq!(correct, vec!["A"]);
    assert_eq!(question.options[2].option, "Option 3");

    // Identity comes from the request, not the model output
    assert_eq!(response.username, "alice");
    assert_eq!(response.topic, "databases");

    assert_eq!(response.metadata.total_questions, 1);
    assert_eq!(
        response.metadata.difficulty_distribution.get("basic"),
        Some(&1)
    );
}

#[actix_web::test]
async fn fenced_text_output_is_parsed() {
    let fenced = format!(
        "```json\n{}\n```",
        json!({
            "username": "a",
            "topic": "b",
            "questions": [{
                "question_text": "Q?",
                "explanation": "E",
                "options": [
                    {"option": "A", "is_correct": true},
                    {"option": "B", "is_correct": false},
                    {"option": "C", "is_correct": false},
                    {"option": "D", "is_correct": false}
                ],
                "difficulty": "intermediate"
            }]
        })
    );

    let response = service_for(TextBackend(fenced))
        .generate(request("alice", "databases"))
        .await
        .expect("fenced JSON should repair cleanly");

    assert_eq!(response.questions.len(), 1);
    assert!(!response.timestamp.is_empty());
}

#[actix_web::test]
async fn unparseable_text_fails_with_malformed_payload() {
    let err = service_for(TextBackend("I'm sorry, I can't do that".to_string()))
        .generate(request("alice", "databases"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedPayload(_)));
}

#[actix_web::test]
async fn question_with_non_string_text_is_dropped_not_fatal() {
    let payload = json!({
        "username": "a",
        "topic": "b",
        "questions": [
            {
                "question_text": "Q?",
                "explanation": "E",
                "options": [
                    {"option": "A", "is_correct": true},
                    {"option": "B", "is_correct": false},
                    {"option": "C", "is_correct": false},
                    {"option": "D", "is_correct": false}
                ],
                "difficulty": "basic"
            },
            {
                "question_text": 42,
                "explanation": "E",
                "options": [
                    {"option": "A", "is_correct": true},
                    {"option": "B", "is_correct": false},
                    {"option": "C", "is_correct": false},
                    {"option": "D", "is_correct": false}
                ],
                "difficulty": "basic"
            }
        ]
    });

    let response = service_for(StaticBackend(payload))
        .generate(request("alice", "databases"))
        .await
        .expect("one valid question should be enough to respond");

    assert_eq!(response.questions.len(), 1);
    assert_eq!(response.questions[0].question_text, "Q?");
    assert_eq!(response.metadata.total_questions, 1);
}

#[actix_web::test]
async fn all_invalid_questions_fail_with_malformed_payload() {
    let payload = json!({
        "username": "a",
        "topic": "b",
        "questions": [
            {"question_text": "no explanation"},
            {"explanation": "no question text"}
        ]
    });

    let err = service_for(StaticBackend(payload))
        .generate(request("alice", "databases"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedPayload(_)));
}

#[actix_web::test]
async fn disabled_sections_come_back_null_even_when_backend_sends_them() {
    let mut payload = json!({
        "username": "a",
        "topic": "b",
        "questions": [{
            "question_text": "Q?",
            "explanation": "E",
            "options": [
                {"option": "A", "is_correct": true},
                {"option": "B", "is_correct": false},
                {"option": "C", "is_correct": false},
                {"option": "D", "is_correct": false}
            ],
            "difficulty": "basic"
        }]
    });
    payload["roadmap"] = json!([
        {"step_number": 1, "title": "T", "description": "D", "estimated_duration": "1 week"}
    ]);
    payload["reference_videos"] = json!([
        {"title": "V", "url": "https://x", "difficulty_level": "basic"}
    ]);

    let dto = serde_json::from_value(json!({
        "username": "alice",
        "topic": "databases",
        "include_roadmap": false,
        "include_videos": false
    }))
    .expect("request should deserialize");

    let response: GenerationResponse = service_for(StaticBackend(payload))
        .generate(dto)
        .await
        .unwrap();

    assert!(response.roadmap.is_none());
    assert!(response.reference_videos.is_none());
    assert!(!response.metadata.has_roadmap);
    assert!(!response.metadata.has_reference_videos);
}

#[actix_web::test]
async fn http_generate_mcq_returns_repaired_response() {
    let payload = json!({
        "username": "a",
        "topic": "b",
        "timestamp": "2024-01-15T10:30:00Z",
        "questions": [{
            "question_text": "Q?",
            "explanation": "E",
            "options": [
                {"option": "A", "is_correct": true},
                {"option": "B", "is_correct": false}
            ],
            "difficulty": "basic"
        }]
    });

    let state = AppState::with_backend(Arc::new(StaticBackend(payload)), Config::from_env());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(handlers::generate_mcq),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/generate-mcq")
        .set_json(request_json("alice", "databases"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    assert_eq!(body["questions"][0]["options"].as_array().unwrap().len(), 4);
    assert_eq!(body["metadata"]["total_questions"], 1);
}

#[actix_web::test]
async fn http_invalid_username_returns_bad_request() {
    let state = AppState::with_backend(
        Arc::new(StaticBackend(json!({}))),
        Config::from_env(),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(handlers::generate_mcq),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/generate-mcq")
        .set_json(request_json("not a valid user!", "databases"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn http_health_endpoints_respond() {
    let state = AppState::with_backend(
        Arc::new(StaticBackend(json!({}))),
        Config::from_env(),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(handlers::liveness_check)
            .service(handlers::readiness_check)
            .service(handlers::generation_stats),
    )
    .await;

    for uri in [
        "/api/v1/health/live",
        "/api/v1/health/ready",
        "/api/v1/generate-mcq/stats",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "endpoint {uri} should be OK");
    }
}
