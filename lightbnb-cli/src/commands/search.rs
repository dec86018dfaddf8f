//! Search command - filtered property listings

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_db::{ListingStore, PropertyFilter};

use crate::output::Output;

#[derive(Parser, Debug, Default)]
#[command(about = "Search properties, cheapest first")]
pub struct SearchArgs {
    /// City name contains this text (case-sensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly price in dollars
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum nightly price in dollars
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum average rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum number of results (default from config, 10)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

impl SearchArgs {
    pub fn to_filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone().filter(|c| !c.is_empty()),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

pub async fn run_search<W: Write>(
    args: SearchArgs,
    default_limit: u32,
    store: &dyn ListingStore,
    out: &mut Output<W>,
) -> Result<()> {
    let filter = args.to_filter();
    let limit = args.limit.unwrap_or(default_limit);
    let listings = store
        .search(&filter, limit)
        .await
        .context("Property search failed")?;
    out.listings(&listings)
}
