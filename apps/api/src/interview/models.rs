use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Difficulty of a generated question. Model output is matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single generated interview question. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Ordered questions; never longer than the count that was asked for.
pub type QuestionSet = Vec<Question>;

/// Score and feedback for one answer.
///
/// `score` is whatever the model returned; values outside 0..=10 are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i64,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// The question being answered: either bare text or a question object.
/// Extra fields on the object form are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionInput {
    Text(String),
    Structured { text: String },
}

impl QuestionInput {
    pub fn text(&self) -> &str {
        match self {
            QuestionInput::Text(text) | QuestionInput::Structured { text } => text.as_str(),
        }
    }
}

/// Opening turn of a mock interview, synthesized without a completion call.
#[derive(Debug, Clone, Serialize)]
pub struct MockStart {
    pub session_id: String,
    pub greeting: String,
    pub first_question: String,
}

/// Outcome of one `continue` call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockTurnResult {
    Continue {
        feedback: String,
        next_question: String,
    },
    Complete {
        closing_message: String,
    },
}

impl MockTurnResult {
    pub fn is_complete(&self) -> bool {
        matches!(self, MockTurnResult::Complete { .. })
    }
}

/// Wire form of `MockTurnResult`: a flat object keyed by `is_complete`.
#[derive(Debug, Clone, Serialize)]
pub struct MockTurnResponse {
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_message: Option<String>,
}

impl From<MockTurnResult> for MockTurnResponse {
    fn from(result: MockTurnResult) -> Self {
        match result {
            MockTurnResult::Continue {
                feedback,
                next_question,
            } => MockTurnResponse {
                is_complete: false,
                feedback: Some(feedback),
                next_question: Some(next_question),
                closing_message: None,
            },
            MockTurnResult::Complete { closing_message } => MockTurnResponse {
                is_complete: true,
                feedback: None,
                next_question: None,
                closing_message: Some(closing_message),
            },
        }
    }
}

/// Server-held state of a managed mock interview.
#[derive(Debug, Clone, Serialize)]
pub struct MockSession {
    pub session_id: String,
    pub role: String,
    /// Completed candidate answers. Never decreases.
    pub turn_count: u32,
    pub complete: bool,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl MockSession {
    pub fn new(session_id: String, role: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            role,
            turn_count: 0,
            complete: false,
            started_at: now,
            last_activity: now,
        }
    }
}
