//! Interview Orchestrator: coordinates prompts, the completion call, and parsing.
//!
//! Flow per operation: build prompt → `CompletionClient::complete` → parse →
//! typed result (or the fixed fallback).
//!
//! The orchestrator is stateless. Mock-interview progress (`turn_count`) is
//! owned by the caller, who must serialize `continue` calls per session;
//! `sessions::SessionStore` does that for server-managed sessions.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::models::{Evaluation, MockStart, MockTurnResult, QuestionSet};
use crate::interview::parser::{
    fallback_evaluation, fallback_questions, parse_evaluation, parse_questions,
    split_feedback_question,
};
use crate::interview::prompts::{
    evaluation_prompt, mock_continuation_prompt, mock_opening_prompt, mock_system_prompt,
    question_generation_prompt, EVALUATION_SYSTEM, MOCK_CLOSING_MESSAGE, QUESTION_GEN_SYSTEM,
};
use crate::llm_client::CompletionClient;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const DEFAULT_DIFFICULTY: &str = "mixed";

/// Answers accepted before the interview closes. The call made with
/// `turn_count == MAX_MOCK_TURNS` (the fifth answer) ends the session.
pub const MAX_MOCK_TURNS: u32 = 4;

#[derive(Clone)]
pub struct InterviewOrchestrator {
    llm: Arc<dyn CompletionClient>,
}

impl InterviewOrchestrator {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Generates up to `count` questions for `role`.
    ///
    /// Never fails: a completion error or unparsable output both degrade to
    /// the built-in question list.
    pub async fn generate_questions(
        &self,
        role: &str,
        count: usize,
        difficulty: &str,
    ) -> QuestionSet {
        let session_key = format!("question_gen_{}", Uuid::new_v4());
        let prompt = question_generation_prompt(role, count, difficulty);

        let raw = match self
            .llm
            .complete(&session_key, QUESTION_GEN_SYSTEM, &prompt)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Question generation call failed for {role}, using fallback questions: {e}");
                return fallback_questions(role, count);
            }
        };

        match parse_questions(&raw, count) {
            Ok(questions) => {
                info!("Generated {} questions for {role}", questions.len());
                questions
            }
            Err(e) => {
                warn!("Failed to parse generated questions ({e}), using fallback questions");
                fallback_questions(role, count)
            }
        }
    }

    /// Scores one answer.
    ///
    /// Unparsable output yields the fixed fallback evaluation; a failed
    /// completion call is returned as `AppError::Llm`.
    pub async fn evaluate_answer(
        &self,
        question_text: &str,
        answer: &str,
        role: &str,
    ) -> Result<Evaluation, AppError> {
        let session_key = format!("eval_{}", Uuid::new_v4());
        let prompt = evaluation_prompt(question_text, answer, role);

        let raw = self
            .llm
            .complete(&session_key, EVALUATION_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to evaluate answer: {e}")))?;

        match parse_evaluation(&raw) {
            Ok(evaluation) => {
                if !(0..=10).contains(&evaluation.score) {
                    warn!("Model returned out-of-range score {}", evaluation.score);
                }
                info!("Evaluated answer with score: {}", evaluation.score);
                Ok(evaluation)
            }
            Err(e) => {
                warn!("Failed to parse evaluation ({e}), using fallback evaluation");
                Ok(fallback_evaluation())
            }
        }
    }

    /// Opens a mock interview. No completion call is made.
    pub fn start_mock_interview(&self, role: &str) -> MockStart {
        let session_id = format!("mock_{}", Uuid::new_v4());
        let (greeting, first_question) = mock_opening_prompt(role);

        info!("Started mock interview {session_id} for {role}");

        MockStart {
            session_id,
            greeting,
            first_question,
        }
    }

    /// Advances a mock interview by one answer.
    ///
    /// `turn_count` is the number of answers already given before this one.
    /// At `MAX_MOCK_TURNS` or beyond the interview closes without a
    /// completion call; otherwise exactly one call produces feedback and the
    /// next question. The caller increments `turn_count` itself.
    pub async fn continue_mock_interview(
        &self,
        session_id: &str,
        answer: &str,
        role: &str,
        turn_count: u32,
    ) -> Result<MockTurnResult, AppError> {
        if turn_count >= MAX_MOCK_TURNS {
            info!("Mock interview {session_id} complete after {turn_count} answers");
            return Ok(MockTurnResult::Complete {
                closing_message: MOCK_CLOSING_MESSAGE.to_string(),
            });
        }

        let system = mock_system_prompt(role);
        let prompt = mock_continuation_prompt(answer, role);

        let raw = self
            .llm
            .complete(session_id, &system, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to continue mock interview: {e}")))?;

        let sections = split_feedback_question(&raw);

        Ok(MockTurnResult::Continue {
            feedback: sections.feedback,
            next_question: sections.next_question,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::interview::models::Difficulty;
    use crate::interview::parser::DEFAULT_NEXT_QUESTION;
    use crate::llm_client::LlmError;

    /// Scripted completion client: returns `reply` (or an API error) and
    /// records every call.
    pub(crate) struct ScriptedClient {
        reply: Option<String>,
        calls: AtomicUsize,
        last_call: Mutex<Option<(String, String, String)>>,
    }

    impl ScriptedClient {
        pub(crate) fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_call: Mutex::new(None),
            })
        }

        pub(crate) fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
                last_call: Mutex::new(None),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_call(&self) -> Option<(String, String, String)> {
            self.last_call.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            session_key: &str,
            system_prompt: &str,
            user_text: &str,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_call.lock().unwrap() = Some((
                session_key.to_string(),
                system_prompt.to_string(),
                user_text.to_string(),
            ));
            self.reply.clone().ok_or(LlmError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        }
    }

    fn orchestrator(client: &Arc<ScriptedClient>) -> InterviewOrchestrator {
        InterviewOrchestrator::new(client.clone())
    }

    // ── generate_questions ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_questions_parses_model_output() {
        let client = ScriptedClient::replying(
            "```json\n[{\"text\": \"What is RAII?\", \"difficulty\": \"Hard\", \"context\": \"C++\"}]\n```",
        );
        let questions = orchestrator(&client)
            .generate_questions("C++ Developer", 5, DEFAULT_DIFFICULTY)
            .await;

        assert_eq!(client.calls(), 1);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, Difficulty::Hard);

        let (session_key, system, prompt) = client.last_call().unwrap();
        assert!(session_key.starts_with("question_gen_"));
        assert_eq!(system, QUESTION_GEN_SYSTEM);
        assert!(prompt.contains("Difficulty level: mixed"));
    }

    #[tokio::test]
    async fn test_generate_questions_falls_back_on_unparsable_output() {
        let client = ScriptedClient::replying("I'd be happy to help with that!");
        let orchestrator = orchestrator(&client);

        for count in 1..=5 {
            let questions = orchestrator.generate_questions("Analyst", count, "Easy").await;
            assert_eq!(questions, fallback_questions("Analyst", count));
        }
        assert_eq!(
            orchestrator.generate_questions("Analyst", 9, "Easy").await.len(),
            5
        );
    }

    #[tokio::test]
    async fn test_generate_questions_falls_back_on_service_error() {
        let client = ScriptedClient::failing();
        let questions = orchestrator(&client)
            .generate_questions("Analyst", 3, DEFAULT_DIFFICULTY)
            .await;

        assert_eq!(client.calls(), 1);
        assert_eq!(questions, fallback_questions("Analyst", 3));
    }

    #[tokio::test]
    async fn test_generate_questions_never_exceeds_count() {
        let client = ScriptedClient::replying(
            r#"[{"text": "A", "difficulty": "Easy"}, {"text": "B", "difficulty": "Easy"},
                {"text": "C", "difficulty": "Medium"}]"#,
        );
        let questions = orchestrator(&client)
            .generate_questions("Analyst", 2, DEFAULT_DIFFICULTY)
            .await;
        assert_eq!(questions.len(), 2);
    }

    // ── evaluate_answer ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_evaluate_answer_returns_model_evaluation() {
        let client = ScriptedClient::replying(
            r#"{"score": 9, "feedback": "Excellent", "strengths": ["Depth"], "improvements": ["Brevity"]}"#,
        );
        let evaluation = orchestrator(&client)
            .evaluate_answer("What is a mutex?", "A lock", "SRE")
            .await
            .unwrap();

        assert_eq!(evaluation.score, 9);
        assert_eq!(evaluation.improvements, vec!["Brevity".to_string()]);
        let (session_key, system, _) = client.last_call().unwrap();
        assert!(session_key.starts_with("eval_"));
        assert_eq!(system, EVALUATION_SYSTEM);
    }

    #[tokio::test]
    async fn test_evaluate_answer_unparsable_yields_fixed_fallback() {
        let client = ScriptedClient::replying("Score: pretty good!");
        let evaluation = orchestrator(&client)
            .evaluate_answer("Q", "A", "SRE")
            .await
            .unwrap();
        assert_eq!(evaluation, fallback_evaluation());
    }

    #[tokio::test]
    async fn test_evaluate_answer_keeps_out_of_range_score() {
        let client = ScriptedClient::replying(r#"{"score": 12, "feedback": "Off the charts"}"#);
        let evaluation = orchestrator(&client)
            .evaluate_answer("Q", "A", "SRE")
            .await
            .unwrap();
        assert_eq!(evaluation.score, 12);
    }

    #[tokio::test]
    async fn test_evaluate_answer_surfaces_service_error() {
        let client = ScriptedClient::failing();
        let result = orchestrator(&client).evaluate_answer("Q", "A", "SRE").await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    // ── start_mock_interview ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_start_mock_interview_makes_no_call() {
        let client = ScriptedClient::replying("unused");
        let start = orchestrator(&client).start_mock_interview("Data Scientist");

        assert_eq!(client.calls(), 0);
        assert!(start.session_id.starts_with("mock_"));
        assert!(!start.greeting.is_empty());
        assert!(start.first_question.contains("Data Scientist"));
    }

    #[tokio::test]
    async fn test_start_mock_interview_keys_are_unique() {
        let client = ScriptedClient::replying("unused");
        let orchestrator = orchestrator(&client);
        let a = orchestrator.start_mock_interview("Dev");
        let b = orchestrator.start_mock_interview("Dev");
        assert_ne!(a.session_id, b.session_id);
    }

    // ── continue_mock_interview ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_continue_below_limit_issues_one_call() {
        let client = ScriptedClient::replying("FEEDBACK: Clear.\nQUESTION: What was the hardest bug?");
        let orchestrator = orchestrator(&client);

        for turn_count in 0..MAX_MOCK_TURNS {
            let result = orchestrator
                .continue_mock_interview("mock_abc", "I built a cache.", "Dev", turn_count)
                .await
                .unwrap();
            match result {
                MockTurnResult::Continue {
                    feedback,
                    next_question,
                } => {
                    assert_eq!(feedback, "Clear.");
                    assert_eq!(next_question, "What was the hardest bug?");
                }
                other => panic!("turn {turn_count} should continue, got {other:?}"),
            }
            assert_eq!(client.calls(), turn_count as usize + 1);
        }

        let (session_key, system, prompt) = client.last_call().unwrap();
        assert_eq!(session_key, "mock_abc");
        assert!(system.contains("Dev position"));
        assert!(prompt.contains("I built a cache."));
    }

    #[tokio::test]
    async fn test_continue_at_limit_completes_without_call() {
        let client = ScriptedClient::replying("FEEDBACK: x\nQUESTION: y");
        let result = orchestrator(&client)
            .continue_mock_interview("mock_abc", "anything", "any role", MAX_MOCK_TURNS)
            .await
            .unwrap();

        assert_eq!(client.calls(), 0);
        assert_eq!(
            result,
            MockTurnResult::Complete {
                closing_message: MOCK_CLOSING_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_continue_past_limit_still_completes() {
        let client = ScriptedClient::failing();
        let result = orchestrator(&client)
            .continue_mock_interview("mock_abc", "late answer", "Dev", 11)
            .await
            .unwrap();
        assert!(result.is_complete());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_continue_without_question_marker_uses_default() {
        let client = ScriptedClient::replying("Good energy, but add metrics.");
        let result = orchestrator(&client)
            .continue_mock_interview("mock_abc", "answer", "Dev", 3)
            .await
            .unwrap();
        assert_eq!(
            result,
            MockTurnResult::Continue {
                feedback: "Good energy, but add metrics.".to_string(),
                next_question: DEFAULT_NEXT_QUESTION.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_continue_surfaces_service_error() {
        let client = ScriptedClient::failing();
        let result = orchestrator(&client)
            .continue_mock_interview("mock_abc", "answer", "Dev", 0)
            .await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
