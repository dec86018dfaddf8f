//! Reservations

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::property::Property;

/// A guest's reservation together with the reserved property
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Reservation {
    #[sqlx(rename = "reservation_id")]
    pub id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl Reservation {
    /// Number of nights booked
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
