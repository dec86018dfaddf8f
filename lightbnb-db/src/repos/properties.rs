//! Property repository
//!
//! - search: one grouped query built by [`PropertyQuery`]
//! - add: INSERT ... RETURNING, database assigns id and `active`

use async_trait::async_trait;
use sqlx::PgPool;

use super::{log_failure, ListingStore};
use crate::models::{NewProperty, Property, PropertyListing};
use crate::query::{PropertyFilter, PropertyQuery};
use crate::{DbError, Result};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Listings matching every present filter, ordered by ascending nightly
    /// cost, at most `limit` rows.
    pub async fn search(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyListing>> {
        let query = PropertyQuery::build(filter, limit);
        tracing::debug!(
            sql = query.sql(),
            params = query.params().len(),
            "searching properties"
        );

        let rows = query
            .bind(sqlx::query_as::<_, PropertyListing>(query.sql()))
            .fetch_all(self.pool)
            .await
            .map_err(DbError::from)
            .inspect_err(|e| log_failure("search_properties", e))?;

        tracing::debug!(rows = rows.len(), "property search complete");
        Ok(rows)
    }

    /// Insert a property after validating it.
    pub async fn add(&self, property: &NewProperty) -> Result<Property> {
        property.validate()?;

        let inserted = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::from)
        .inspect_err(|e| log_failure("add_property", e))?;

        tracing::info!(
            property_id = inserted.id,
            owner_id = inserted.owner_id,
            "property added"
        );
        Ok(inserted)
    }
}

#[async_trait]
impl<'a> ListingStore for PropertyRepo<'a> {
    async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        self.add(property).await
    }

    async fn search(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyListing>> {
        PropertyRepo::search(self, filter, limit).await
    }
}
