//! Reservations command - a guest's bookings

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_db::ReservationRepo;
use sqlx::PgPool;

use crate::output::Output;

#[derive(Parser, Debug)]
#[command(about = "List a guest's reservations, earliest first")]
pub struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    pub guest_id: i32,

    /// Maximum number of reservations (default from config, 10)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

pub async fn run_reservations<W: Write>(
    args: ReservationsArgs,
    default_limit: u32,
    pool: &PgPool,
    out: &mut Output<W>,
) -> Result<()> {
    let limit = args.limit.unwrap_or(default_limit);
    let reservations = ReservationRepo::new(pool)
        .list_for_guest(args.guest_id, limit)
        .await
        .with_context(|| format!("Failed to fetch reservations for guest {}", args.guest_id))?;
    out.reservations(&reservations)
}
