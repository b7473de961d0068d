#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::dto::GenerateMcqRequest;

    /// Creates a schema-conformant question with the given 1-based id.
    pub fn valid_question(id: u64) -> Value {
        json!({
            "question_id": id,
            "question_text": format!("What is question number {id} about?"),
            "explanation": "A detailed explanation of why the first option is the correct one.",
            "options": [
                {"option": "The correct answer", "is_correct": true},
                {"option": "A plausible distractor", "is_correct": false},
                {"option": "Another distractor", "is_correct": false},
                {"option": "A final distractor", "is_correct": false}
            ],
            "difficulty": "basic",
            "topic_area": "General"
        })
    }

    /// A fully valid backend payload with two questions and no optional
    /// sections, so that repairing it is a no-op.
    pub fn valid_payload() -> Value {
        json!({
            "username": "john_doe",
            "topic": "Rust",
            "timestamp": "2024-01-15T10:30:00Z",
            "questions": [valid_question(1), valid_question(2)]
        })
    }

    /// Creates an inbound request DTO with defaults left unset.
    pub fn mcq_request(username: &str, topic: &str) -> GenerateMcqRequest {
        serde_json::from_value(json!({"username": username, "topic": topic}))
            .expect("fixture request should deserialize")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_valid_question_shape() {
        let question = valid_question(3);

        assert_eq!(question["question_id"], 3);
        assert_eq!(question["options"].as_array().unwrap().len(), 4);
        assert_eq!(
            question["options"]
                .as_array()
                .unwrap()
                .iter()
                .filter(|o| o["is_correct"].as_bool().unwrap())
                .count(),
            1
        );
    }

    #[test]
    fn test_fixtures_valid_payload_shape() {
        let payload = valid_payload();

        assert_eq!(payload["username"], "john_doe");
        assert_eq!(payload["questions"].as_array().unwrap().len(), 2);
    }
}
