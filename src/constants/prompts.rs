use crate::models::domain::GenerationRequest;

/// Placeholder the model is asked to emit for `reference_videos`; the
/// backend substitutes curated references before repair.
pub const VIDEO_SEARCH_PLACEHOLDER: &str = "<<SEARCH_VIDEOS>>";

pub const MCQ_GENERATION_PROMPT: &str = r#"You are an expert educational content generator specializing in creating comprehensive learning materials.

Generate {question_count} multiple-choice questions (MCQs) on the topic of "{topic}" for user "{username}".

The difficulty level should be "{difficulty}".
Include roadmap: {include_roadmap}
Include reference videos: {include_videos}

**STRICT GUIDELINES:**

1. **MCQ Requirements:**
   - Each question must have exactly 4 options with only ONE correct answer
   - Include detailed explanation for the correct answer (50-150 words)
   - Assign appropriate difficulty level (basic, intermediate, advanced)
   - Ensure questions cover different aspects of the topic
   - Make questions clear, unambiguous, and technically accurate
   - Include specific topic_area for each question

2. **Roadmap Requirements (if include_roadmap is true):**
   - Create 5-8 sequential learning steps
   - Each step should have: step_number, title, description, estimated_duration, prerequisites
   - Cover the complete learning journey from beginner to advanced
   - Provide realistic time estimates

3. **Reference Videos (if include_videos is true):**
   - Set "reference_videos" to the literal string "<<SEARCH_VIDEOS>>"

**JSON STRUCTURE - Follow this EXACTLY:**

{
  "username": "{username}",
  "topic": "{topic}",
  "timestamp": "2024-01-15T10:30:00Z",
  "questions": [
    {
      "question_id": 1,
      "question_text": "Your question here?",
      "explanation": "Detailed explanation of why the correct answer is correct and why others are wrong",
      "options": [
        { "option": "Option A text", "is_correct": false },
        { "option": "Option B text", "is_correct": true },
        { "option": "Option C text", "is_correct": false },
        { "option": "Option D text", "is_correct": false }
      ],
      "difficulty": "basic|intermediate|advanced",
      "topic_area": "Specific subtopic"
    }
  ],
  "roadmap": [
    {
      "step_number": 1,
      "title": "Step Title",
      "description": "Detailed description of what to learn",
      "estimated_duration": "X weeks/days",
      "prerequisites": ["Prerequisite 1", "Prerequisite 2"]
    }
  ],
  "reference_videos": "<<SEARCH_VIDEOS>>",
  "metadata": {
    "generation_time_seconds": 0
  }
}

**CRITICAL REQUIREMENTS:**
- Generate EXACTLY {question_count} questions
- If include_roadmap is false, set "roadmap": null
- If include_videos is false, set "reference_videos": null
- Your response must be ONLY valid JSON, no additional text

Generate comprehensive, high-quality educational content that provides real learning value."#;

pub fn render_mcq_prompt(request: &GenerationRequest) -> String {
    MCQ_GENERATION_PROMPT
        .replace("{question_count}", &request.question_count.to_string())
        .replace("{topic}", &request.topic)
        .replace("{username}", &request.username)
        .replace("{difficulty}", request.difficulty.as_str())
        .replace("{include_roadmap}", &request.include_roadmap.to_string())
        .replace("{include_videos}", &request.include_videos.to_string())
}
