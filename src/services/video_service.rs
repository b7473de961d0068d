use crate::{constants::prompts::VIDEO_SEARCH_PLACEHOLDER, models::domain::ReferenceVideo};

/// Static fallback references built from the topic. The original search
/// engine lookup was too unreliable to keep; these portal links are the
/// documented best-effort substitute.
pub fn fallback_videos(topic: &str) -> Vec<ReferenceVideo> {
    let display = title_case(topic);
    let query = topic.replace(' ', "%20");

    vec![
        ReferenceVideo {
            title: format!("{display} - Khan Academy"),
            url: format!("https://www.khanacademy.org/search?search_again=1&search_query={query}"),
            duration: "Variable".to_string(),
            difficulty_level: "basic".to_string(),
            description: format!("Khan Academy resources for {topic}"),
        },
        ReferenceVideo {
            title: format!("{display} - Coursera Courses"),
            url: format!("https://www.coursera.org/search?query={query}"),
            duration: "Variable".to_string(),
            difficulty_level: "intermediate".to_string(),
            description: format!("Professional courses on {topic}"),
        },
        ReferenceVideo {
            title: format!("{display} - YouTube Learning"),
            url: format!(
                "https://www.youtube.com/results?search_query={}+tutorial",
                topic.replace(' ', "+")
            ),
            duration: "Variable".to_string(),
            difficulty_level: "mixed".to_string(),
            description: format!("YouTube tutorials and educational content about {topic}"),
        },
    ]
}

/// Replaces the model's `"<<SEARCH_VIDEOS>>"` marker with curated fallback
/// references, or with `null` when videos were not requested. Content
/// without the marker passes through untouched.
pub fn expand_video_placeholder(content: String, topic: &str, include_videos: bool) -> String {
    let marker = format!("\"{VIDEO_SEARCH_PLACEHOLDER}\"");
    if !content.contains(&marker) {
        return content;
    }

    let replacement = if include_videos {
        serde_json::to_string(&fallback_videos(topic)).unwrap_or_else(|_| "[]".to_string())
    } else {
        "null".to_string()
    };

    content.replace(&marker, &replacement)
}

fn title_case(topic: &str) -> String {
    topic
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
