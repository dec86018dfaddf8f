//! Schema migrations for the LightBnB tables
//!
//! Every statement is `IF NOT EXISTS`, so running twice is harmless.

use sqlx::PgPool;

use crate::Result;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY NOT NULL,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL
        )
        "#,
    ),
    (
        "properties",
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id SERIAL PRIMARY KEY NOT NULL,
            owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            thumbnail_photo_url VARCHAR(255) NOT NULL,
            cover_photo_url VARCHAR(255) NOT NULL,
            cost_per_night INTEGER NOT NULL DEFAULT 0,
            parking_spaces INTEGER NOT NULL DEFAULT 0,
            number_of_bathrooms INTEGER NOT NULL DEFAULT 0,
            number_of_bedrooms INTEGER NOT NULL DEFAULT 0,
            country VARCHAR(255) NOT NULL,
            street VARCHAR(255) NOT NULL,
            city VARCHAR(255) NOT NULL,
            province VARCHAR(255) NOT NULL,
            post_code VARCHAR(255) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
    ),
    (
        "reservations",
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id SERIAL PRIMARY KEY NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    ),
    (
        "property_reviews",
        r#"
        CREATE TABLE IF NOT EXISTS property_reviews (
            id SERIAL PRIMARY KEY NOT NULL,
            guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
            rating SMALLINT NOT NULL DEFAULT 0,
            message TEXT
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    // Same name as the UNIQUE constraint's index, so this only builds on
    // users tables created without it
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users(email)",
    "CREATE INDEX IF NOT EXISTS idx_properties_owner ON properties(owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_properties_cost ON properties(cost_per_night)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id, start_date)",
    "CREATE INDEX IF NOT EXISTS idx_property_reviews_property ON property_reviews(property_id)",
];

/// Names of the tables created by [`run`], in dependency order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

/// Create all tables and indexes
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running LightBnB migrations...");

    for &(name, ddl) in TABLES {
        tracing::debug!(table = name, "creating table");
        sqlx::query(ddl).execute(pool).await?;
    }

    for &ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!("LightBnB migrations complete");
    Ok(())
}
