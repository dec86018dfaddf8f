//! Reservation repository

use sqlx::PgPool;

use super::log_failure;
use crate::models::Reservation;
use crate::{DbError, Result};

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A guest's reservations with property details and average rating,
    /// earliest stay first.
    ///
    /// An unknown guest has no reservations; that is an empty list, not
    /// NotFound.
    pub async fn list_for_guest(&self, guest_id: i32, limit: u32) -> Result<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT
                properties.*,
                reservations.id AS reservation_id,
                reservations.start_date,
                reservations.end_date,
                AVG(property_reviews.rating)::FLOAT8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date ASC
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await
        .map_err(DbError::from)
        .inspect_err(|e| log_failure("get_all_reservations", e))?;

        tracing::debug!(guest_id, rows = rows.len(), "reservations fetched");
        Ok(rows)
    }
}
