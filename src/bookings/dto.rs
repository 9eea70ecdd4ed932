use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::dto::PublicUser;

/// Request body for booking creation. Instants are RFC 3339.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

/// Query string carrying the acting user. There is no session; identity is
/// always explicit.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub user_id: i64,
    pub owner: Option<PublicUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn booking_request_parses_rfc3339() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{"start_time":"2024-01-01T09:00:00Z","end_time":"2024-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.start_time, datetime!(2024-01-01 09:00 UTC));
        assert_eq!(req.end_time, datetime!(2024-01-01 10:00 UTC));
    }

    #[test]
    fn booking_response_renders_rfc3339() {
        let res = BookingResponse {
            id: 7,
            start_time: datetime!(2024-01-01 09:00 UTC),
            end_time: datetime!(2024-01-01 10:00 UTC),
            user_id: 3,
            owner: None,
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("2024-01-01T09:00:00Z"));
        assert!(json.contains(r#""user_id":3"#));
    }
}
