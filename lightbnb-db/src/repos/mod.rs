//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues exactly one
//! statement per operation:
//! - Lookups return `DbError::NotFound` instead of an empty value
//! - Uniqueness is enforced inside the insert statement (no check-then-insert)
//! - Errors are logged where they leave the repository, then propagated

pub mod users;
pub mod properties;
pub mod reservations;

use async_trait::async_trait;

pub use users::UserRepo;
pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;

use crate::models::{NewProperty, Property, PropertyListing};
use crate::query::PropertyFilter;
use crate::Result;

/// Storage for listings
///
/// The PostgreSQL-backed [`PropertyRepo`] is the implementation; callers
/// that only need listings can depend on this trait instead.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Insert a listing and return the stored row.
    async fn add_property(&self, property: &NewProperty) -> Result<Property>;

    /// Listings matching every present filter, cheapest first.
    async fn search(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyListing>>;
}

/// Log a repository failure before handing it to the caller.
pub(crate) fn log_failure(operation: &'static str, err: &crate::DbError) {
    if err.is_storage() {
        tracing::error!(operation, error = %err, "query failed");
    } else {
        tracing::debug!(operation, error = %err, "query returned no result");
    }
}
