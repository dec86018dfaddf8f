//! Command implementations for the lightbnb CLI

pub mod migrate;
pub mod property;
pub mod reservations;
pub mod search;
pub mod user;

// Re-export dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use property::run_property;
pub use reservations::run_reservations;
pub use search::run_search;
pub use user::run_user;
