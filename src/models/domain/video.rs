use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_DURATION: &str = "Unknown";
pub const DEFAULT_VIDEO_DESCRIPTION: &str = "Educational video content";

/// A reference video surviving repair: title, url and difficulty_level were
/// present and the url uses an http(s) scheme. Duration and description are
/// always filled, with defaults when the backend omitted them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceVideo {
    pub title: String,
    pub url: String,
    pub duration: String,
    pub difficulty_level: String,
    pub description: String,
}
