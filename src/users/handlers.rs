use axum::{extract::State, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{PublicUser, RegisterRequest},
        password,
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users/", post(register))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.username = payload.username.trim().to_string();
    if payload.username.is_empty() {
        warn!("empty username");
        return Err(ApiError::BadRequest("Username is required".into()));
    }

    // The form client posts an empty string when the field is left blank.
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    if let Some(ref email) = email {
        if !is_valid_email(email) {
            warn!(email = %email, "invalid email");
            return Err(ApiError::BadRequest("Invalid email".into()));
        }
    }

    if payload.password.is_empty() {
        warn!("empty password");
        return Err(ApiError::BadRequest("Password is required".into()));
    }

    let hash = password::hash_password(&payload.password)?;

    let user = match User::create(&state.db, &payload.username, email.as_deref(), &hash).await {
        Ok(u) => u,
        Err(e) => {
            warn!(username = %payload.username, error = %e, "registration refused");
            return Err(e);
        }
    };

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(PublicUser::from(user)))
}
