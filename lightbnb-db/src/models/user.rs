//! Users

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{required_text, ValidationError};

/// Column width of `users.name`, `users.email` and `users.password`
const MAX_USER_FIELD_LEN: usize = 255;

/// Loose shape check: something@something, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Validated input for user insertion
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNewUser")]
pub struct NewUser {
    name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RawNewUser {
    name: String,
    email: String,
    password: String,
}

impl TryFrom<RawNewUser> for NewUser {
    type Error = ValidationError;

    fn try_from(raw: RawNewUser) -> Result<Self, Self::Error> {
        Self::new(&raw.name, &raw.email, &raw.password)
    }
}

impl NewUser {
    /// Create a new user input.
    ///
    /// # Rules
    /// - All fields non-empty, at most 255 characters
    /// - Email has the shape `local@domain` with no whitespace
    ///
    /// Name and email are trimmed; the password is stored as given.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::NewUser;
    ///
    /// assert!(NewUser::new("Eva Stanley", "sebastianguerra@ymail.com", "secret").is_ok());
    /// assert!(NewUser::new("Eva Stanley", "not-an-email", "secret").is_err());
    /// ```
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        required_text("name", name, MAX_USER_FIELD_LEN)?;
        required_text("email", email, MAX_USER_FIELD_LEN)?;

        let email = email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain",
            });
        }

        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        if password.chars().count() > MAX_USER_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_USER_FIELD_LEN,
            });
        }

        Ok(Self {
            name: name.trim().to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
