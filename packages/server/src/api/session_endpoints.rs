//! Display session endpoint
//!
//! A fixed set of display users whose password equals their username,
//! answering with a constant session flag the manager UI stores. This is
//! a UI gate for kiosk screens, not authentication; no other endpoint
//! checks the flag.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::api::{AppState, HttpError};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub username: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
}

/// Open a display session
///
/// Accepts a configured display user whose password matches the
/// username; everything else is rejected with 401.
async fn open_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, HttpError> {
    let known = state
        .display_users
        .iter()
        .any(|user| user == &request.username);

    if !known || request.password != request.username {
        tracing::debug!("Rejected display session for '{}'", request.username);
        return Err(HttpError::new(
            "Invalid username or password",
            "INVALID_CREDENTIALS",
        ));
    }

    tracing::info!("Opened display session for '{}'", request.username);

    Ok(Json(SessionResponse {
        token: "logged_in".to_string(),
    }))
}

/// Create router with the session endpoint
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/session", post(open_session))
        .with_state(state)
}
