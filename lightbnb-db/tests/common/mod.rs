//! Shared fixtures for database-backed tests
//!
//! Tests using these helpers need `DATABASE_URL` and run with `--ignored`.
//! Each test inserts its own users with unique emails, so runs never
//! collide with each other or with seed data.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use lightbnb_db::{schema, DatabaseConfig, NewProperty, NewUser, Property, User, UserRepo};
use sqlx::PgPool;

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub async fn pool() -> PgPool {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lightbnb_db=debug")
        .with_test_writer()
        .try_init();

    let pool = lightbnb_db::connect(&DatabaseConfig::from_env())
        .await
        .expect("pool creation failed");
    schema::run(&pool).await.expect("migrations failed");
    pool
}

/// Token unique to this process and call
pub fn unique() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}-{}", std::process::id(), nanos, n)
}

pub fn new_user() -> NewUser {
    let token = unique();
    NewUser::new("Test Guest", &format!("guest-{token}@example.com"), "password").unwrap()
}

pub async fn insert_user(pool: &PgPool) -> User {
    UserRepo::new(pool).add(&new_user()).await.expect("insert user")
}

pub fn new_property(owner_id: i32, city: &str, cost_per_night: i32) -> NewProperty {
    NewProperty {
        owner_id,
        title: format!("Listing {}", unique()),
        description: "description".into(),
        thumbnail_photo_url: "https://example.com/thumb.jpg".into(),
        cover_photo_url: "https://example.com/cover.jpg".into(),
        cost_per_night,
        parking_spaces: 1,
        number_of_bathrooms: 2,
        number_of_bedrooms: 3,
        country: "Canada".into(),
        street: "1 Test Street".into(),
        city: city.into(),
        province: "Ontario".into(),
        post_code: "A1B 2C3".into(),
    }
}

/// Book `property` for `guest` and leave a review with `rating`.
pub async fn reserve_and_review(
    pool: &PgPool,
    guest: &User,
    property: &Property,
    start: NaiveDate,
    rating: i16,
) -> i32 {
    let (reservation_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO reservations (start_date, end_date, property_id, guest_id)
        VALUES ($1, $1 + 3, $2, $3)
        RETURNING id
        "#,
    )
    .bind(start)
    .bind(property.id)
    .bind(guest.id)
    .fetch_one(pool)
    .await
    .expect("insert reservation");

    sqlx::query(
        r#"
        INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
        VALUES ($1, $2, $3, $4, 'test review')
        "#,
    )
    .bind(guest.id)
    .bind(property.id)
    .bind(reservation_id)
    .bind(rating)
    .execute(pool)
    .await
    .expect("insert review");

    reservation_id
}
