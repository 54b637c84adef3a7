use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /login
/// Coarse access gate against the fixed credential set. Success issues no
/// session or token, only a confirmation.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let is_valid = state
        .credentials()
        .verify(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        tracing::warn!(username = %payload.username, "Rejected login attempt");
        return Err(ApiError::unauthorized());
    }

    tracing::info!(username = %payload.username, "Login successful");

    Ok(Json(MessageResponse {
        message: "Login successful".to_string(),
    }))
}
