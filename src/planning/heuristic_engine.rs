//! Deterministic stand-ins for model-backed estimation.
//!
//! Everything here is a pure function of its arguments. "Now" is passed in
//! explicitly so deadline prediction is reproducible.

use std::{collections::HashMap, sync::LazyLock};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::task::Task;

pub const SUMMARY_MAX_CHARS: usize = 140;
const SUMMARY_KEEP_CHARS: usize = SUMMARY_MAX_CHARS - 3;

pub const MAX_EFFORT_MINUTES: u32 = 8 * 60;
const BASE_EFFORT_MINUTES: u32 = 20;
const MINUTES_PER_KEYWORD: u32 = 18;
const ESTIMATE_KEYWORD_LIMIT: usize = 10;
pub const MIN_CONFIDENCE: f64 = 0.35;
pub const MAX_CONFIDENCE: f64 = 0.92;
const DEADLINE_SLACK: f64 = 1.15;

const SUBTASK_SEEDS: [&str; 4] = [
    "Define acceptance criteria",
    "Break work into 30-minute focus blocks",
    "Schedule first execution block",
    "Review and refine output",
];

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{4,}\b").expect("keyword pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffortEstimate {
    pub minutes: u32,
    pub confidence: f64,
}

/// Text up to 140 characters comes back untouched. Longer text is cut to
/// 137 characters, right-trimmed, and suffixed with "...".
pub fn summarize(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(SUMMARY_KEEP_CHARS).collect();
    format!("{}...", head.trim_end())
}

/// Words of four or more letters, most frequent first, ties in lexical order.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in KEYWORD_RE.find_iter(&lowered) {
        *counts.entry(token.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

pub fn generate_subtasks(task: &Task) -> Vec<String> {
    let mut steps: Vec<String> = SUBTASK_SEEDS.iter().map(|s| s.to_string()).collect();
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        steps[0] = format!("Clarify: {}", summarize(description));
    }
    steps
}

pub fn estimate_effort(task: &Task) -> EffortEstimate {
    let text = [Some(task.title.as_str()), task.description.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let complexity = extract_keywords(&text, ESTIMATE_KEYWORD_LIMIT).len().max(1) as u32;
    let minutes = (BASE_EFFORT_MINUTES + complexity * MINUTES_PER_KEYWORD).min(MAX_EFFORT_MINUTES);
    let confidence = (1.0 - 1.0 / (complexity as f64 + 2.0)).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    EffortEstimate {
        minutes,
        confidence: round_to(confidence, 3),
    }
}

/// An explicit due date always wins over the prediction.
pub fn predict_deadline(task: &Task, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Some(due_at) = task.due_at {
        return due_at;
    }
    let minutes = estimate_effort(task).minutes;
    let padded = (minutes as f64 * DEADLINE_SLACK).ceil() as i64;
    now + Duration::minutes(padded)
}

/// Fill the derived fields of a freshly created task.
pub fn enrich(task: &mut Task, now: DateTime<Utc>) {
    let estimate = estimate_effort(task);
    task.predicted_due_at = Some(predict_deadline(task, now));
    task.estimated_minutes = estimate.minutes;
    task.estimate_confidence = Some(estimate.confidence);
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
