//! lightbnb-db: PostgreSQL data-access layer for LightBnB
//!
//! Translates application requests (look up a user, list a guest's
//! reservations, search listings, insert users and properties) into
//! parameterized SQL and hands typed rows back to the caller.
//!
//! Every operation returns `Result<T, DbError>`, so callers can tell
//! "no such row" apart from a storage failure.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod query;
pub mod repos;
pub mod schema;

pub use config::DatabaseConfig;
pub use error::{DbError, Result};
pub use models::{
    Cents, NewProperty, NewUser, Property, PropertyListing, Reservation, User, ValidationError,
};
pub use pool::{connect, create_pool};
pub use query::{PropertyFilter, PropertyQuery, SqlParam, DEFAULT_LIMIT};
pub use repos::{ListingStore, PropertyRepo, ReservationRepo, UserRepo};
