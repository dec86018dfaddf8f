//! Domain models with validation at construction
//!
//! Insert inputs (`NewUser`, `NewProperty`) are validated before any SQL
//! is issued. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod money;
pub mod user;
pub mod property;
pub mod reservation;

pub use validation::ValidationError;
pub use money::Cents;
pub use user::{NewUser, User};
pub use property::{NewProperty, Property, PropertyListing};
pub use reservation::Reservation;
