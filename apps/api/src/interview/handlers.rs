//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::{
    Evaluation, MockSession, MockStart, MockTurnResponse, QuestionInput, QuestionSet,
};
use crate::interview::orchestrator::{DEFAULT_DIFFICULTY, DEFAULT_QUESTION_COUNT};
use crate::state::AppState;

pub const MAX_QUESTION_COUNT: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub role: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: QuestionSet,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question: QuestionInput,
    pub answer: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct StartMockRequest {
    pub role: String,
}

/// Caller-driven continuation: the client tracks `question_count` itself.
#[derive(Debug, Deserialize)]
pub struct ContinueMockRequest {
    pub session_id: String,
    pub answer: String,
    pub role: String,
    #[serde(default)]
    pub question_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct SessionAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SessionAnswerResponse {
    #[serde(flatten)]
    pub turn: MockTurnResponse,
    pub turn_count: u32,
}

fn require_role(role: &str) -> Result<(), AppError> {
    if role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/questions
///
/// Always answers 200: generation problems degrade to the built-in questions.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    require_role(&request.role)?;
    if request.count == 0 || request.count > MAX_QUESTION_COUNT {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_QUESTION_COUNT}"
        )));
    }

    let questions = state
        .orchestrator
        .generate_questions(&request.role, request.count, &request.difficulty)
        .await;

    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// POST /api/v1/interview/evaluate
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    require_role(&request.role)?;
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let evaluation = state
        .orchestrator
        .evaluate_answer(request.question.text(), &request.answer, &request.role)
        .await?;

    Ok(Json(evaluation))
}

/// POST /api/v1/interview/mock/start
pub async fn handle_start_mock(
    State(state): State<AppState>,
    Json(request): Json<StartMockRequest>,
) -> Result<Json<MockStart>, AppError> {
    require_role(&request.role)?;
    Ok(Json(state.orchestrator.start_mock_interview(&request.role)))
}

/// POST /api/v1/interview/mock/continue
pub async fn handle_continue_mock(
    State(state): State<AppState>,
    Json(request): Json<ContinueMockRequest>,
) -> Result<Json<MockTurnResponse>, AppError> {
    require_role(&request.role)?;

    let result = state
        .orchestrator
        .continue_mock_interview(
            &request.session_id,
            &request.answer,
            &request.role,
            request.question_count,
        )
        .await?;

    Ok(Json(result.into()))
}

/// POST /api/v1/interview/mock/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(request): Json<StartMockRequest>,
) -> Result<(StatusCode, Json<MockStart>), AppError> {
    require_role(&request.role)?;
    let start = state.sessions.start(&state.orchestrator, &request.role);
    Ok((StatusCode::CREATED, Json(start)))
}

/// GET /api/v1/interview/mock/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MockSession>, AppError> {
    Ok(Json(state.sessions.get(&session_id).await?))
}

/// POST /api/v1/interview/mock/sessions/:id/answer
pub async fn handle_session_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SessionAnswerRequest>,
) -> Result<Json<SessionAnswerResponse>, AppError> {
    let (result, session) = state
        .sessions
        .answer(&state.orchestrator, &session_id, &request.answer)
        .await?;

    Ok(Json(SessionAnswerResponse {
        turn: result.into(),
        turn_count: session.turn_count,
    }))
}

/// DELETE /api/v1/interview/mock/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(&session_id)?;
    Ok(StatusCode::NO_CONTENT)
}
