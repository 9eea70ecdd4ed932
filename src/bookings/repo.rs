use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

use crate::error::ApiError;

/// Booking record in the database. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub user_id: i64,
}

impl Booking {
    /// Persist an admitted booking. The foreign key on `user_id` backstops
    /// the handler's user lookup; a violation maps to `UnknownUser`.
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> Result<Booking, ApiError> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (start_time, end_time, user_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, start_time, end_time, user_id
            "#,
        )
        .bind(start_time)
        .bind(end_time)
        .bind(user_id)
        .fetch_one(db)
        .await;

        match created {
            Ok(booking) => Ok(booking),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(ApiError::UnknownUser)
            }
            Err(e) => Err(ApiError::Internal(e.into())),
        }
    }

    /// Full dump, earliest start first.
    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, start_time, end_time, user_id
            FROM bookings
            ORDER BY start_time ASC, id ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_pool;
    use crate::users::repo::User;
    use time::macros::datetime;

    #[tokio::test]
    async fn create_and_list_round_trip() {
        let db = test_pool().await;
        let user = User::create(&db, "alice", None, "h4sh").await.expect("user");

        let booking = Booking::create(
            &db,
            user.id,
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
        )
        .await
        .expect("booking");
        assert_eq!(booking.user_id, user.id);

        let all = Booking::list(&db).await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].start_time, datetime!(2024-01-01 09:00 UTC));
    }

    #[tokio::test]
    async fn unknown_user_is_refused_by_foreign_key() {
        let db = test_pool().await;
        let err = Booking::create(
            &db,
            999,
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::UnknownUser));
    }

    #[tokio::test]
    async fn list_orders_by_start_time() {
        let db = test_pool().await;
        let user = User::create(&db, "alice", None, "h4sh").await.expect("user");
        Booking::create(
            &db,
            user.id,
            datetime!(2024-01-01 12:00 UTC),
            datetime!(2024-01-01 13:00 UTC),
        )
        .await
        .expect("later");
        Booking::create(
            &db,
            user.id,
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
        )
        .await
        .expect("earlier");

        let all = Booking::list(&db).await.expect("list");
        assert_eq!(all[0].start_time, datetime!(2024-01-01 09:00 UTC));
        assert_eq!(all[1].start_time, datetime!(2024-01-01 12:00 UTC));
    }
}
