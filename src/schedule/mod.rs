pub mod handlers;
pub mod slots;
pub mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::slot_routes()
}
