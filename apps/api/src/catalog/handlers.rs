use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::errors::AppError;
use crate::models::catalog::{Company, Skill};
use crate::state::AppState;

/// GET /api/companies
pub async fn handle_list_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    Json(state.catalog.list_companies().to_vec())
}

/// GET /api/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Company>, AppError> {
    state
        .catalog
        .get_company(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

/// GET /api/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<Vec<Skill>> {
    Json(state.catalog.list_skills().to_vec())
}

/// GET /api/top-paying-roles
pub async fn handle_top_paying_roles(State(state): State<AppState>) -> Response {
    match state.catalog.list_top_paying_roles().await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => {
            error!("Error loading top paying roles: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load data" })),
            )
                .into_response()
        }
    }
}
