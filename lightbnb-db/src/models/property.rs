//! Properties (listings)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::money::Cents;
use super::validation::{non_negative, required_text, ValidationError};

const MAX_TEXT_LEN: usize = 255;

/// Property record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly cost in cents
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl Property {
    pub fn cost(&self) -> Cents {
        Cents::from(self.cost_per_night)
    }
}

/// Property with its average review rating, as returned by search
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// NULL when the property has no reviews
    pub average_rating: Option<f64>,
}

/// Input for property insertion
///
/// `id` is generated by the database and `active` takes its column default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly cost in cents
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl NewProperty {
    /// Check the fields the schema constrains.
    ///
    /// # Rules
    /// - `title`, photo URLs and address fields non-empty, at most 255 characters
    /// - cost and counts non-negative
    /// - `description` may be empty
    pub fn validate(&self) -> Result<(), ValidationError> {
        required_text("title", &self.title, MAX_TEXT_LEN)?;
        required_text("thumbnail_photo_url", &self.thumbnail_photo_url, MAX_TEXT_LEN)?;
        required_text("cover_photo_url", &self.cover_photo_url, MAX_TEXT_LEN)?;
        required_text("country", &self.country, MAX_TEXT_LEN)?;
        required_text("street", &self.street, MAX_TEXT_LEN)?;
        required_text("city", &self.city, MAX_TEXT_LEN)?;
        required_text("province", &self.province, MAX_TEXT_LEN)?;
        required_text("post_code", &self.post_code, MAX_TEXT_LEN)?;

        non_negative("cost_per_night", self.cost_per_night.into())?;
        non_negative("parking_spaces", self.parking_spaces.into())?;
        non_negative("number_of_bathrooms", self.number_of_bathrooms.into())?;
        non_negative("number_of_bedrooms", self.number_of_bedrooms.into())?;

        Ok(())
    }
}
