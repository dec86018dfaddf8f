//! User command - look up and register users

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{DbError, NewUser, UserRepo};
use sqlx::PgPool;

use crate::output::Output;

#[derive(Parser, Debug)]
#[command(about = "Look up or register users")]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Fetch a single user by id or email
    Get {
        /// User id
        #[arg(long, conflicts_with = "email", required_unless_present = "email")]
        id: Option<i32>,
        /// Exact email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Register a new user (fails if the email is taken)
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address, must be unused
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
}

pub async fn run_user<W: Write>(args: UserArgs, pool: &PgPool, out: &mut Output<W>) -> Result<()> {
    let repo = UserRepo::new(pool);

    match args.command {
        UserCommand::Get { id, email } => {
            let result = match (id, email.as_deref()) {
                (Some(id), _) => repo.get_with_id(id).await,
                (None, Some(email)) => repo.get_with_email(email).await,
                (None, None) => bail!("Provide --id or --email"),
            };
            match result {
                Ok(user) => out.user(&user),
                Err(DbError::NotFound { id, .. }) => bail!("No user matching '{}'", id),
                Err(e) => Err(e).context("User lookup failed"),
            }
        }
        UserCommand::Add {
            name,
            email,
            password,
        } => {
            let new_user = NewUser::new(&name, &email, &password).context("Invalid user")?;
            match repo.add(&new_user).await {
                Ok(user) => out.user(&user),
                Err(e) if e.is_conflict() => bail!("Email '{}' is already registered", new_user.email()),
                Err(e) => Err(e).context("Failed to add user"),
            }
        }
    }
}
