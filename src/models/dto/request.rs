use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

/// Inbound generation request as received from the wire, before
/// normalization. Fields are optional so that missing-vs-invalid can be
/// distinguished in the normalizer; `question_count` stays a raw JSON value
/// because out-of-range or non-integer counts are repaired, not rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateMcqRequest {
    #[validate(
        length(min = 2, max = 50),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must contain only alphanumeric characters, hyphens, and underscores"
        )
    )]
    pub username: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub topic: Option<String>,

    pub difficulty: Option<crate::models::domain::Difficulty>,

    pub question_count: Option<Value>,

    pub include_roadmap: Option<bool>,

    pub include_videos: Option<bool>,
}
