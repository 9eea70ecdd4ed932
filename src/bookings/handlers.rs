use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    bookings::{
        dto::{BookingResponse, CreateBookingRequest, OwnerQuery},
        repo::Booking,
    },
    error::ApiError,
    schedule::validate,
    state::AppState,
    users::{dto::PublicUser, repo::User},
};

pub fn booking_routes() -> Router<AppState> {
    Router::new().route("/bookings/", post(create_booking).get(list_bookings))
}

#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    Query(q): Query<OwnerQuery>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    // Owner is resolved by explicit lookup, never inferred from session state.
    let user = User::find_by_id(&state.db, q.user_id)
        .await?
        .ok_or(ApiError::UnknownUser)?;

    let now = OffsetDateTime::now_utc();
    let admitted =
        match validate::admit(payload.start_time, payload.end_time, now, &state.config.schedule) {
            Ok(a) => a,
            Err(e) => {
                warn!(user_id = %user.id, start = %payload.start_time, reason = %e, "booking refused");
                return Err(e.into());
            }
        };

    let booking =
        Booking::create(&state.db, user.id, admitted.start_time, admitted.end_time).await?;

    info!(booking_id = %booking.id, user_id = %user.id, start = %booking.start_time, "booking created");
    Ok(Json(BookingResponse {
        id: booking.id,
        start_time: booking.start_time,
        end_time: booking.end_time,
        user_id: booking.user_id,
        owner: Some(PublicUser::from(user)),
    }))
}

#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = Booking::list(&state.db).await?;
    Ok(Json(bookings))
}
