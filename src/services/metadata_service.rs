use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{json, Map, Value};

/// Computes summary statistics for a repaired response mapping.
///
/// Pure derivation apart from the timestamp: question counts, a difficulty
/// histogram keyed by whatever difficulty strings are present, and
/// roadmap/video counts. Any metadata the backend already supplied is
/// merged in afterwards with its keys winning, so upstream timing data
/// survives recomputation.
pub fn synthesize(repaired: &Map<String, Value>) -> Map<String, Value> {
    let questions = repaired
        .get("questions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    for question in questions {
        let difficulty = question
            .get("difficulty")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        *distribution.entry(difficulty.to_string()).or_insert(0) += 1;
    }

    let roadmap_steps = section_len(repaired.get("roadmap"));
    let video_count = section_len(repaired.get("reference_videos"));

    let mut metadata = Map::new();
    metadata.insert("total_questions".to_string(), json!(questions.len()));
    metadata.insert("difficulty_distribution".to_string(), json!(distribution));
    metadata.insert("has_roadmap".to_string(), json!(roadmap_steps > 0));
    metadata.insert("has_reference_videos".to_string(), json!(video_count > 0));
    metadata.insert("roadmap_steps".to_string(), json!(roadmap_steps));
    metadata.insert("reference_video_count".to_string(), json!(video_count));
    metadata.insert(
        "validation_timestamp".to_string(),
        json!(Utc::now().to_rfc3339()),
    );

    if let Some(existing) = repaired.get("metadata").and_then(Value::as_object) {
        for (key, value) in existing {
            metadata.insert(key.clone(), value.clone());
        }
    }

    metadata
}

fn section_len(section: Option<&Value>) -> usize {
    section.and_then(Value::as_array).map_or(0, Vec::len)
}
