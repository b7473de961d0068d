use serde::{Deserialize, Serialize};

/// One step of a learning roadmap. Unlike questions, steps with missing
/// descriptive fields are retained (the missing field defaults to empty),
/// so everything except `step_number` tolerates absence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoadmapStep {
    pub step_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_duration: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}
