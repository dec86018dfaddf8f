//! Rendering of query results: JSON for scripts, plain lines for people

use std::io::Write;

use anyhow::Result;
use lightbnb_db::{Property, PropertyListing, Reservation, User};
use serde::Serialize;

/// Output sink selected by `--json`
pub struct Output<W: Write> {
    json: bool,
    writer: W,
}

impl Output<std::io::Stdout> {
    pub fn stdout(json: bool) -> Self {
        Self::new(json, std::io::stdout())
    }
}

impl<W: Write> Output<W> {
    pub fn new(json: bool, writer: W) -> Self {
        Self { json, writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn user(&mut self, user: &User) -> Result<()> {
        if self.json {
            return self.json(user);
        }
        writeln!(self.writer, "#{} {} <{}>", user.id, user.name, user.email)?;
        Ok(())
    }

    pub fn property(&mut self, property: &Property) -> Result<()> {
        if self.json {
            return self.json(property);
        }
        self.property_line(property, None)
    }

    pub fn listings(&mut self, listings: &[PropertyListing]) -> Result<()> {
        if self.json {
            return self.json(listings);
        }
        if listings.is_empty() {
            writeln!(self.writer, "No matching properties.")?;
        }
        for listing in listings {
            self.property_line(&listing.property, listing.average_rating)?;
        }
        Ok(())
    }

    pub fn reservations(&mut self, reservations: &[Reservation]) -> Result<()> {
        if self.json {
            return self.json(reservations);
        }
        if reservations.is_empty() {
            writeln!(self.writer, "No reservations.")?;
        }
        for r in reservations {
            writeln!(
                self.writer,
                "{} -> {} ({} nights)",
                r.start_date,
                r.end_date,
                r.nights()
            )?;
            self.property_line(&r.property, r.average_rating)?;
        }
        Ok(())
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        if self.json {
            return self.json(&serde_json::json!({ "message": text }));
        }
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    fn property_line(&mut self, p: &Property, rating: Option<f64>) -> Result<()> {
        let rating = rating
            .map(|r| format!("{:.2}", r))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            self.writer,
            "#{} {} | {}, {} | {}/night | {} bd {} ba {} pk | rating {}",
            p.id,
            p.title,
            p.city,
            p.province,
            p.cost(),
            p.number_of_bedrooms,
            p.number_of_bathrooms,
            p.parking_spaces,
            rating
        )?;
        Ok(())
    }
}
