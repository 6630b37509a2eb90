use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub message: String,
    pub user: PublicUser,
}

/// POST /api/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(body) = payload?;
    let fields: Map<String, Value> = match body {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(AppError::Validation("Invalid JSON".to_string())),
    };

    state.accounts.create_user(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created successfully!".to_string(),
        }),
    ))
}

/// POST /api/signin
pub async fn handle_signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SigninResponse>, AppError> {
    let Json(req) = payload?;
    let (Some(email), Some(password)) = (
        req.email.filter(|e| !e.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Email and password required".to_string(),
        ));
    };

    let user = state.accounts.authenticate(&email, &password).await?;
    info!("Sign in for {}", user.email);

    Ok(Json(SigninResponse {
        message: "Sign in successful".to_string(),
        user,
    }))
}
