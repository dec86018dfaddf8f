//! Migrate command - create the LightBnB tables

use anyhow::{Context, Result};
use lightbnb_db::schema;
use sqlx::PgPool;
use std::io::Write;

use crate::output::Output;

pub async fn run_migrate<W: Write>(pool: &PgPool, out: &mut Output<W>) -> Result<()> {
    schema::run(pool).await.context("Migration failed")?;
    let tables: Vec<_> = schema::table_names().collect();
    out.message(&format!("Schema ready: {}", tables.join(", ")))
}
