use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::slots::available_slots;

#[derive(Debug, Serialize)]
pub struct AvailableSlotsResponse {
    pub available_slots: Vec<String>,
}

pub fn slot_routes() -> Router<AppState> {
    Router::new().route("/available-slots", get(list_available_slots))
}

#[instrument(skip(state))]
pub async fn list_available_slots(
    State(state): State<AppState>,
) -> Result<Json<AvailableSlotsResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let mut rendered = Vec::new();
    for slot in available_slots(now, &state.config.schedule) {
        rendered.push(slot.format(&Rfc3339).map_err(anyhow::Error::from)?);
    }
    Ok(Json(AvailableSlotsResponse {
        available_slots: rendered,
    }))
}
