//! Property command - add listings from JSON

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{ListingStore, NewProperty};

use crate::output::Output;

#[derive(Parser, Debug)]
#[command(about = "Manage property listings")]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Add a property from a JSON document
    ///
    /// `cost_per_night` is in cents. `-` reads the document from stdin:
    ///   lightbnb property add --file listing.json
    ///   cat listing.json | lightbnb property add --file -
    Add {
        /// Path to the JSON document, or `-` for stdin
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

pub async fn run_property<W: Write>(
    args: PropertyArgs,
    store: &dyn ListingStore,
    out: &mut Output<W>,
) -> Result<()> {
    match args.command {
        PropertyCommand::Add { file } => {
            let raw = read_document(&file)?;
            let property = parse_property(&raw)?;
            let stored = store
                .add_property(&property)
                .await
                .context("Failed to add property")?;
            out.property(&stored)
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read property from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_property(raw: &str) -> Result<NewProperty> {
    let property: NewProperty = serde_json::from_str(raw).context("Invalid property JSON")?;
    property.validate().context("Invalid property")?;
    Ok(property)
}
