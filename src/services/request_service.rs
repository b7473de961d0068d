use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            request::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT},
            Difficulty, GenerationRequest,
        },
        dto::GenerateMcqRequest,
    },
};

/// Validates an inbound request and fills defaults, producing a fully
/// populated [`GenerationRequest`].
///
/// Missing or malformed `username`/`topic` fail with `InvalidRequest`. An
/// out-of-range or non-integer `question_count` is a repair, not a
/// rejection: it is silently replaced with the default and logged.
pub fn normalize(dto: GenerateMcqRequest) -> AppResult<GenerationRequest> {
    dto.validate()?;

    let username = required_field(dto.username, "username")?;
    let topic = required_field(dto.topic, "topic")?;

    let question_count = normalize_question_count(dto.question_count.as_ref(), &username);

    Ok(GenerationRequest {
        username,
        topic,
        difficulty: dto.difficulty.unwrap_or(Difficulty::Mixed),
        question_count,
        include_roadmap: dto.include_roadmap.unwrap_or(true),
        include_videos: dto.include_videos.unwrap_or(true),
    })
}

fn required_field(value: Option<String>, name: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidRequest(format!("Missing or empty required field: {name}")))
}

fn normalize_question_count(raw: Option<&Value>, username: &str) -> u8 {
    let in_range = raw.and_then(Value::as_i64).and_then(|count| {
        (i64::from(MIN_QUESTION_COUNT)..=i64::from(MAX_QUESTION_COUNT))
            .contains(&count)
            .then_some(count as u8)
    });

    match (raw, in_range) {
        (_, Some(count)) => count,
        (None, _) => DEFAULT_QUESTION_COUNT,
        (Some(bad), None) => {
            log::warn!(
                "Invalid question_count {bad} from user '{username}', defaulting to {DEFAULT_QUESTION_COUNT}"
            );
            DEFAULT_QUESTION_COUNT
        }
    }
}
