pub mod health;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::accounts::handlers as accounts;
use crate::catalog::handlers as catalog;
use crate::interview::handlers as interview;
use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/companies", get(catalog::handle_list_companies))
        .route("/api/companies/:id", get(catalog::handle_get_company))
        .route("/api/skills", get(catalog::handle_list_skills))
        .route("/api/top-paying-roles", get(catalog::handle_top_paying_roles))
        // Accounts
        .route("/api/signup", post(accounts::handle_signup))
        .route("/api/signin", post(accounts::handle_signin))
        // Generator-backed
        .route("/ask_assistant", post(interview::handle_ask_assistant))
        .route("/mock_interview", post(interview::handle_mock_interview))
        .fallback(not_found)
        .with_state(state)
}

/// The router with the HTTP layers both hosting shapes share.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
