use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        video::{DEFAULT_VIDEO_DESCRIPTION, DEFAULT_VIDEO_DURATION},
        GenerationRequest,
    },
    services::model_service::RawGeneration,
};

/// Controls which optional sections survive repair. Backend output for a
/// section the caller disabled is discarded rather than passed through.
#[derive(Clone, Copy, Debug)]
pub struct RepairOptions {
    pub include_roadmap: bool,
    pub include_videos: bool,
}

impl From<&GenerationRequest> for RepairOptions {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            include_roadmap: request.include_roadmap,
            include_videos: request.include_videos,
        }
    }
}

/// Aggregated record of every correction applied during one repair pass.
/// Individual fixes are never surfaced as errors; they are collected here
/// and logged as a single summary line.
#[derive(Debug, Default)]
pub struct RepairReport {
    pub dropped_questions: usize,
    pub padded_options: usize,
    pub truncated_options: usize,
    pub replaced_options: usize,
    pub corrected_answers: usize,
    pub incomplete_roadmap_steps: usize,
    pub dropped_roadmap_steps: usize,
    pub dropped_videos: usize,
    pub discarded_sections: Vec<&'static str>,
    pub synthesized_timestamp: bool,
    pub notes: Vec<String>,
}

impl RepairReport {
    pub fn has_corrections(&self) -> bool {
        self.dropped_questions > 0
            || self.padded_options > 0
            || self.truncated_options > 0
            || self.replaced_options > 0
            || self.corrected_answers > 0
            || self.incomplete_roadmap_steps > 0
            || self.dropped_roadmap_steps > 0
            || self.dropped_videos > 0
            || !self.discarded_sections.is_empty()
            || self.synthesized_timestamp
    }

    pub fn summary(&self) -> String {
        format!(
            "dropped_questions={} padded_options={} truncated_options={} replaced_options={} \
             corrected_answers={} incomplete_roadmap_steps={} dropped_roadmap_steps={} \
             dropped_videos={} discarded_sections={:?} synthesized_timestamp={}",
            self.dropped_questions,
            self.padded_options,
            self.truncated_options,
            self.replaced_options,
            self.corrected_answers,
            self.incomplete_roadmap_steps,
            self.dropped_roadmap_steps,
            self.dropped_videos,
            self.discarded_sections,
            self.synthesized_timestamp,
        )
    }

    fn note(&mut self, message: String) {
        log::warn!("{}", message);
        self.notes.push(message);
    }
}

/// Repairs an untrusted generation payload into a response-shaped mapping.
///
/// Fails with `MalformedPayload` only for unparseable input, a missing
/// top-level `username`/`topic`/`questions`, a non-array `questions`, or
/// zero surviving questions. Every other anomaly is corrected in place and
/// recorded in the returned [`RepairReport`].
pub fn repair(
    raw: &RawGeneration,
    options: &RepairOptions,
) -> AppResult<(Map<String, Value>, RepairReport)> {
    let mut report = RepairReport::default();

    let mut data = parse_raw(raw)?;
    check_basic_structure(&mut data, &mut report)?;

    let questions = data
        .get("questions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let repaired_questions = repair_questions(&questions, &mut report)?;
    data.insert("questions".to_string(), Value::Array(repaired_questions));

    repair_roadmap(&mut data, options, &mut report);
    repair_videos(&mut data, options, &mut report);

    Ok((data, report))
}

fn parse_raw(raw: &RawGeneration) -> AppResult<Map<String, Value>> {
    let value = match raw {
        RawGeneration::Json(value) => value.clone(),
        RawGeneration::Text(text) => {
            let cleaned = strip_code_fences(text);
            serde_json::from_str(cleaned)
                .map_err(|e| AppError::MalformedPayload(format!("invalid JSON: {e}")))?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            value_kind(&other)
        ))),
    }
}

fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

fn check_basic_structure(data: &mut Map<String, Value>, report: &mut RepairReport) -> AppResult<()> {
    for field in ["username", "topic"] {
        if !data.contains_key(field) {
            return Err(AppError::MalformedPayload(format!(
                "missing required field: {field}"
            )));
        }
    }

    match data.get("questions") {
        None => {
            return Err(AppError::MalformedPayload(
                "missing required field: questions".to_string(),
            ))
        }
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(AppError::MalformedPayload(format!(
                "'questions' must be an array, got {}",
                value_kind(other)
            )))
        }
    }

    if !data.get("timestamp").is_some_and(Value::is_string) {
        data.insert("timestamp".to_string(), json!(Utc::now().to_rfc3339()));
        report.synthesized_timestamp = true;
    }

    Ok(())
}

/// Pure transform over the raw question list: each element is either
/// repaired into a schema-shaped question or dropped, never mutated in
/// place. Question ids are positional (1-based) when absent.
fn repair_questions(questions: &[Value], report: &mut RepairReport) -> AppResult<Vec<Value>> {
    let mut repaired = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        match repair_question(question, index, report) {
            Some(fixed) => repaired.push(fixed),
            None => report.dropped_questions += 1,
        }
    }

    if repaired.is_empty() {
        return Err(AppError::MalformedPayload("no valid questions".to_string()));
    }

    Ok(repaired)
}

fn repair_question(question: &Value, index: usize, report: &mut RepairReport) -> Option<Value> {
    let positional_id = (index + 1) as u64;

    let Some(source) = question.as_object() else {
        report.note(format!("question {positional_id} is not an object, dropping"));
        return None;
    };

    for field in ["question_text", "explanation", "difficulty"] {
        let usable = source
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.is_empty());
        if !usable {
            report.note(format!(
                "question {positional_id} missing or non-string field: {field}, dropping"
            ));
            return None;
        }
    }

    let Some(raw_options) = source.get("options").and_then(Value::as_array) else {
        report.note(format!("question {positional_id}: 'options' must be an array, dropping"));
        return None;
    };

    let mut fixed = source.clone();
    if !has_positive_id(&fixed, "question_id") {
        fixed.insert("question_id".to_string(), json!(positional_id));
    }
    if !fixed.contains_key("topic_area") {
        fixed.insert("topic_area".to_string(), json!("General"));
    }

    let options = repair_options(raw_options, positional_id, report);
    fixed.insert("options".to_string(), Value::Array(options));

    Some(Value::Object(fixed))
}

/// Normalizes an option list to exactly 4 entries with exactly one correct
/// answer. Deterministic given the input ordering: the first originally
/// correct option wins; with none, the first option is promoted.
fn repair_options(raw: &[Value], question_id: u64, report: &mut RepairReport) -> Vec<Value> {
    let mut options: Vec<(String, bool)> = Vec::with_capacity(4);

    for (i, entry) in raw.iter().take(4).enumerate() {
        let text = entry.get("option").and_then(Value::as_str);
        let is_correct = entry
            .get("is_correct")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        match text {
            Some(text) if !text.is_empty() => options.push((text.to_string(), is_correct)),
            _ => {
                report.replaced_options += 1;
                report.note(format!(
                    "question {question_id}: option {} unusable, replacing with placeholder",
                    i + 1
                ));
                options.push((format!("Option {}", i + 1), false));
            }
        }
    }

    if raw.len() > 4 {
        report.truncated_options += raw.len() - 4;
        report.note(format!(
            "question {question_id}: expected 4 options, got {}, truncating",
            raw.len()
        ));
    }
    while options.len() < 4 {
        report.padded_options += 1;
        options.push((format!("Option {}", options.len() + 1), false));
    }
    if raw.len() < 4 {
        report.note(format!(
            "question {question_id}: expected 4 options, got {}, padding",
            raw.len()
        ));
    }

    let correct_count = options.iter().filter(|(_, correct)| *correct).count();
    if correct_count != 1 {
        let winner = options
            .iter()
            .position(|(_, correct)| *correct)
            .unwrap_or(0);
        for (i, (_, correct)) in options.iter_mut().enumerate() {
            *correct = i == winner;
        }
        report.corrected_answers += 1;
        report.note(format!(
            "question {question_id}: expected 1 correct option, got {correct_count}, auto-correcting"
        ));
    }

    options
        .into_iter()
        .map(|(option, is_correct)| json!({"option": option, "is_correct": is_correct}))
        .collect()
}

/// Roadmap steps are deliberately more lenient than questions: a step
/// missing descriptive fields is retained (and logged), not dropped. Only
/// entries that are not objects at all are discarded.
fn repair_roadmap(data: &mut Map<String, Value>, options: &RepairOptions, report: &mut RepairReport) {
    if !options.include_roadmap {
        if data.get("roadmap").is_some_and(is_truthy) {
            report.discarded_sections.push("roadmap");
            report.note("roadmap disabled by request, discarding backend data".to_string());
        }
        data.insert("roadmap".to_string(), Value::Null);
        return;
    }

    let Some(raw) = data.get("roadmap").filter(|v| is_truthy(v)).cloned() else {
        return;
    };

    let Some(steps) = raw.as_array() else {
        report.note("roadmap must be an array, replacing with empty list".to_string());
        data.insert("roadmap".to_string(), json!([]));
        return;
    };

    let mut repaired = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let positional = (index + 1) as u64;

        let Some(source) = step.as_object() else {
            report.dropped_roadmap_steps += 1;
            report.note(format!("roadmap step {positional} is not an object, dropping"));
            continue;
        };

        let mut fixed = source.clone();
        if !has_positive_id(&fixed, "step_number") {
            fixed.insert("step_number".to_string(), json!(positional));
        }

        let mut incomplete = false;
        for field in ["title", "description", "estimated_duration"] {
            let usable = fixed
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| !v.is_empty());
            if !usable {
                fixed.remove(field);
                incomplete = true;
                report.note(format!(
                    "roadmap step {positional} missing or empty field: {field}, retaining step"
                ));
            }
        }
        if incomplete {
            report.incomplete_roadmap_steps += 1;
        }

        let prerequisites: Vec<Value> = fixed
            .get("prerequisites")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter(|v| v.is_string()).cloned().collect())
            .unwrap_or_default();
        fixed.insert("prerequisites".to_string(), Value::Array(prerequisites));

        repaired.push(Value::Object(fixed));
    }

    data.insert("roadmap".to_string(), Value::Array(repaired));
}

fn repair_videos(data: &mut Map<String, Value>, options: &RepairOptions, report: &mut RepairReport) {
    if !options.include_videos {
        if data.get("reference_videos").is_some_and(is_truthy) {
            report.discarded_sections.push("reference_videos");
            report.note("reference videos disabled by request, discarding backend data".to_string());
        }
        data.insert("reference_videos".to_string(), Value::Null);
        return;
    }

    let Some(raw) = data.get("reference_videos").filter(|v| is_truthy(v)).cloned() else {
        return;
    };

    let Some(videos) = raw.as_array() else {
        report.note("reference videos must be an array, replacing with empty list".to_string());
        data.insert("reference_videos".to_string(), json!([]));
        return;
    };

    let mut repaired = Vec::with_capacity(videos.len());
    for (index, video) in videos.iter().enumerate() {
        match repair_video(video, (index + 1) as u64, report) {
            Some(fixed) => repaired.push(fixed),
            None => report.dropped_videos += 1,
        }
    }

    data.insert("reference_videos".to_string(), Value::Array(repaired));
}

fn repair_video(video: &Value, positional: u64, report: &mut RepairReport) -> Option<Value> {
    let Some(source) = video.as_object() else {
        report.note(format!("video {positional} is not an object, dropping"));
        return None;
    };

    for field in ["title", "url", "difficulty_level"] {
        let usable = source
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.is_empty());
        if !usable {
            report.note(format!("video {positional} missing or empty field: {field}, dropping"));
            return None;
        }
    }

    let url = source.get("url").and_then(Value::as_str)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        report.note(format!("video {positional} has invalid URL format, dropping"));
        return None;
    }

    let mut fixed = source.clone();
    if !fixed.get("duration").is_some_and(Value::is_string) {
        fixed.insert("duration".to_string(), json!(DEFAULT_VIDEO_DURATION));
    }
    if !fixed.get("description").is_some_and(Value::is_string) {
        fixed.insert("description".to_string(), json!(DEFAULT_VIDEO_DESCRIPTION));
    }

    Some(Value::Object(fixed))
}

/// A usable backend-supplied id: a positive integer that fits the schema's
/// `u32`. Zero, negative, fractional and oversized values all get the
/// positional fallback instead.
fn has_positive_id(source: &Map<String, Value>, field: &str) -> bool {
    source
        .get(field)
        .and_then(Value::as_u64)
        .is_some_and(|id| (1..=u64::from(u32::MAX)).contains(&id))
}

/// Truthiness in the Python sense: null, false, 0, "" and empty containers
/// are falsy, everything else truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
