use serde::{Deserialize, Serialize};

pub const MIN_QUESTION_COUNT: u8 = 5;
pub const MAX_QUESTION_COUNT: u8 = 50;
pub const DEFAULT_QUESTION_COUNT: u8 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
    Mixed,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generation request after normalization: every field present, the
/// question count guaranteed to sit inside [MIN, MAX].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub username: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u8,
    pub include_roadmap: bool,
    pub include_videos: bool,
}
