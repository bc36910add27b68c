//! Handler for `POST /api/login`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for `POST /api/login`, matching the shape the admin
/// front-end expects.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/login
///
/// Session-less credential check: no token is issued, the front-end only
/// inspects `success`. Verification goes through the pluggable
/// [`crate::auth::CredentialVerifier`].
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    if state.verifier.verify(&input.username, &input.password) {
        Ok((
            StatusCode::OK,
            Json(LoginResponse {
                success: true,
                message: "Login successful",
            }),
        ))
    } else {
        Ok((
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: "Invalid credentials",
            }),
        ))
    }
}
