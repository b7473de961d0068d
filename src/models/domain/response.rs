use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::domain::{Question, ReferenceVideo, RoadmapStep};

/// Derived statistics about a repaired response. Never hand-authored:
/// recomputed on every repair pass, then any backend-supplied metadata keys
/// are merged in on top (they land in `extra` unless they shadow a known
/// field).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GenerationMetadata {
    pub total_questions: usize,
    pub difficulty_distribution: BTreeMap<String, usize>,
    pub has_roadmap: bool,
    pub has_reference_videos: bool,
    pub roadmap_steps: usize,
    pub reference_video_count: usize,
    pub validation_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time_seconds: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The complete outcome of one generation request. `questions` is never
/// empty; a repair pass that salvages zero questions fails instead of
/// producing this type.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GenerationResponse {
    pub username: String,
    pub topic: String,
    pub timestamp: String,
    pub questions: Vec<Question>,
    pub roadmap: Option<Vec<RoadmapStep>>,
    pub reference_videos: Option<Vec<ReferenceVideo>>,
    pub metadata: GenerationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metadata_flattens_extra_keys() {
        let mut extra = Map::new();
        extra.insert("request_timestamp".to_string(), json!("2024-01-15T10:30:00"));

        let metadata = GenerationMetadata {
            total_questions: 2,
            validation_timestamp: "2024-01-15T10:30:01".to_string(),
            extra,
            ..Default::default()
        };

        let value = serde_json::to_value(&metadata).expect("should serialize");
        assert_eq!(value["total_questions"], json!(2));
        assert_eq!(value["request_timestamp"], json!("2024-01-15T10:30:00"));
        // None is omitted entirely rather than serialized as null
        assert!(value.get("generation_time_seconds").is_none());
    }

    #[test]
    fn disabled_sections_serialize_as_null() {
        let response = GenerationResponse {
            username: "learner".to_string(),
            topic: "Rust".to_string(),
            timestamp: "2024-01-15T10:30:00".to_string(),
            questions: vec![],
            roadmap: None,
            reference_videos: None,
            metadata: GenerationMetadata::default(),
        };

        let value = serde_json::to_value(&response).expect("should serialize");
        assert!(value["roadmap"].is_null());
        assert!(value["reference_videos"].is_null());
    }
}
