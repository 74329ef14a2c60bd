pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless interview operations
        .route(
            "/api/v1/interview/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interview/evaluate",
            post(handlers::handle_evaluate_answer),
        )
        // Caller-driven mock interview
        .route(
            "/api/v1/interview/mock/start",
            post(handlers::handle_start_mock),
        )
        .route(
            "/api/v1/interview/mock/continue",
            post(handlers::handle_continue_mock),
        )
        // Server-managed mock interview
        .route(
            "/api/v1/interview/mock/sessions",
            post(handlers::handle_create_session),
        )
        .route(
            "/api/v1/interview/mock/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/interview/mock/sessions/:id/answer",
            post(handlers::handle_session_answer),
        )
        .with_state(state)
}
