use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::interview::orchestrator::run_turn;
use crate::interview::prompts::build_assistant_prompt;
use crate::interview::resolve_context;
use crate::llm_client::prompts::fallback_message;
use crate::llm_client::GeneratorError;
use crate::models::interview::{AssistantRequest, InterviewTurnResult, MockInterviewRequest};
use crate::state::AppState;

const ASSISTANT_FAILURE: &str = "An error occurred while processing your request";

/// POST /ask_assistant
///
/// Generator failures still answer 200, with an apology in `response`.
pub async fn handle_ask_assistant(
    State(state): State<AppState>,
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Response {
    match ask_assistant(&state, payload).await {
        Ok(text) => Json(json!({ "response": text, "status": "success" })).into_response(),
        Err(e) => {
            let message = match &e {
                AppError::Validation(msg) => msg.clone(),
                _ => ASSISTANT_FAILURE.to_string(),
            };
            let status = e.status();
            if !matches!(e, AppError::Validation(_)) {
                tracing::error!("ask_assistant failed: {e}");
            }
            (status, Json(json!({ "error": message, "status": "error" }))).into_response()
        }
    }
}

async fn ask_assistant(
    state: &AppState,
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(req) = payload?;
    let context = resolve_context(
        req.company,
        req.role,
        req.round_type,
        req.num_questions.as_ref(),
    )?;

    let prompt = build_assistant_prompt(&context);
    debug!("Assistant prompt:\n{prompt}");

    match state.generator.generate(&prompt).await {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("Assistant generation failed: {e}");
            Ok(fallback_message(&e).to_string())
        }
    }
}

/// POST /mock_interview
pub async fn handle_mock_interview(
    State(state): State<AppState>,
    payload: Result<Json<MockInterviewRequest>, JsonRejection>,
) -> Result<Json<InterviewTurnResult>, AppError> {
    let Json(req) = payload?;
    let context = resolve_context(
        req.company,
        req.role,
        req.round_type,
        req.num_questions.as_ref(),
    )?;
    let transcript = req.previous_answers.unwrap_or_default();

    let result = run_turn(state.generator.as_ref(), &context, &transcript)
        .await
        .map_err(|e| match e {
            GeneratorError::EmptyCandidate => {
                AppError::Generator("Couldn't generate a response.", e)
            }
            e => AppError::Generator("AI service error", e),
        })?;

    Ok(Json(result))
}
