//! Response parsing: turns raw completion text into typed interview data.
//!
//! Parsers return `Result<_, ParseFailure>`; the orchestrator maps every
//! failure to the fixed fallback values defined here, so nothing past this
//! module ever sees a decode error.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::interview::models::{Difficulty, Evaluation, Question, QuestionSet};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const FEEDBACK_MARKER: &str = "FEEDBACK:";
const QUESTION_MARKER: &str = "QUESTION:";

/// Used when a continuation response carries no usable `QUESTION:` section.
pub const DEFAULT_NEXT_QUESTION: &str =
    "Can you tell me about a challenging project you've worked on?";

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model returned an empty question list")]
    Empty,
}

/// Feedback on the previous answer plus the next question to ask.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSections {
    pub feedback: String,
    pub next_question: String,
}

/// Locates the JSON payload inside a possibly fenced response.
///
/// - a "```json" block wins: text between the first such tag and the next "```"
/// - otherwise a plain fence: text between the first and second "```"
/// - otherwise the trimmed text itself
///
/// An unterminated fence yields everything after the opening marker.
pub fn extract_json_block(raw: &str) -> &str {
    let text = raw.trim();
    let after_open = text
        .split_once(JSON_FENCE)
        .or_else(|| text.split_once(FENCE))
        .map(|(_, rest)| rest);

    match after_open {
        Some(rest) => rest.split_once(FENCE).map_or(rest, |(body, _)| body).trim(),
        None => text,
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, ParseFailure> {
    Ok(serde_json::from_str(extract_json_block(raw))?)
}

/// Decodes a question array, keeping at most `count` entries in model order.
pub fn parse_questions(raw: &str, count: usize) -> Result<QuestionSet, ParseFailure> {
    let mut questions: QuestionSet = decode(raw)?;
    if questions.is_empty() {
        return Err(ParseFailure::Empty);
    }
    questions.truncate(count);
    Ok(questions)
}

pub fn parse_evaluation(raw: &str) -> Result<Evaluation, ParseFailure> {
    decode(raw)
}

/// Splits a continuation response on the first `QUESTION:` marker.
///
/// Feedback is everything before it with every `FEEDBACK:` marker removed.
/// The question is the text up to the next `QUESTION:` marker, if repeated.
/// A missing or blank question section falls back to `DEFAULT_NEXT_QUESTION`.
pub fn split_feedback_question(raw: &str) -> TurnSections {
    let mut parts = raw.split(QUESTION_MARKER);
    let head = parts.next().unwrap_or_default();

    let feedback = head.replace(FEEDBACK_MARKER, "").trim().to_string();
    let next_question = parts
        .next()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_NEXT_QUESTION)
        .to_string();

    TurnSections {
        feedback,
        next_question,
    }
}

/// Fixed generic question list, cut to `count`. Never padded past five.
pub fn fallback_questions(role: &str, count: usize) -> QuestionSet {
    let base = [
        (format!("Tell me about your experience in {role}."), Difficulty::Easy),
        (
            "What are your greatest strengths and weaknesses?".to_string(),
            Difficulty::Medium,
        ),
        (
            "Describe a challenging project you've worked on.".to_string(),
            Difficulty::Medium,
        ),
        (
            "How do you stay updated with industry trends?".to_string(),
            Difficulty::Easy,
        ),
        (
            "Where do you see yourself in 5 years?".to_string(),
            Difficulty::Easy,
        ),
    ];

    base.into_iter()
        .take(count)
        .map(|(text, difficulty)| Question {
            text,
            difficulty,
            context: None,
        })
        .collect()
}

pub fn fallback_evaluation() -> Evaluation {
    Evaluation {
        score: 7,
        feedback: "Your answer demonstrates understanding. Keep practicing!".to_string(),
        strengths: vec!["Clear communication".to_string()],
        improvements: vec!["Add more specific examples".to_string()],
    }
}
