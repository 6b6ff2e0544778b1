//! CLI module for the user directory
//!
//! Provides subcommands that drive the view layer:
//! - `list`: show users, optionally filtered by a search query
//! - `add`: create a user through the validated form
//! - `edit`: change an existing user through the validated form
//! - `delete`: remove a user

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::user::{User, UserField, UserId};
use crate::infrastructure::logging;
use crate::infrastructure::storage::{RepositoryFactory, StorageConfig};
use crate::view::{UserForm, UserStore};

/// Local user directory with validated records and search
#[derive(Parser)]
#[command(name = "user-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List users
    List(list::ListArgs),

    /// Add a new user
    Add(add::AddArgs),

    /// Edit an existing user
    Edit(edit::EditArgs),

    /// Delete a user
    Delete(delete::DeleteArgs),
}

/// Options shared by every command
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// JSON data file to use (overrides config)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

/// Values for the five user fields
#[derive(Args, Clone, Debug, Default)]
pub struct FieldArgs {
    /// Phone number, optional leading '+' and 10-15 digits
    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub middle_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

impl FieldArgs {
    /// Type every provided value into the form; others keep their buffer
    pub fn fill(&self, form: &mut UserForm) {
        let values = [
            (UserField::Phone, &self.phone),
            (UserField::FirstName, &self.first_name),
            (UserField::LastName, &self.last_name),
            (UserField::MiddleName, &self.middle_name),
            (UserField::Email, &self.email),
        ];

        for (field, value) in values {
            if let Some(value) = value {
                form.set_value(field, value.clone());
            }
        }
    }
}

/// Load configuration, install logging and open the store
pub async fn open_store(global: &GlobalArgs) -> anyhow::Result<UserStore> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(path) = &global.data {
        config.storage.backend = "json".to_string();
        config.storage.path = path.clone();
    }

    logging::init_logging(&config.logging);
    debug!(?config, "Configuration loaded");

    let storage = StorageConfig::from_settings(&config.storage)?;
    let repository = RepositoryFactory::create(&storage);

    Ok(UserStore::load(repository, config.search.debounce()).await)
}

/// Turn a recorded storage failure into a non-zero exit
pub fn finish(store: &UserStore) -> anyhow::Result<()> {
    match store.last_error() {
        Some(failure) => Err(anyhow::anyhow!(failure)),
        None => Ok(()),
    }
}

/// Look a user up by the id printed in `list`
pub fn find_user(store: &UserStore, id: &str) -> anyhow::Result<User> {
    let id = UserId::parse(id)?;
    finish(store)?;
    store
        .find(&id)
        .ok_or_else(|| anyhow::anyhow!("User '{}' not found", id))
}

/// Print per-field errors and the aggregate message for a rejected form
pub fn report_invalid(form: &UserForm) -> anyhow::Error {
    for state in form.field_states() {
        if let Some(error) = state.error {
            eprintln!("{}: {} ({:?})", state.field, error, state.value);
        }
    }

    anyhow::anyhow!(form.validation_message().unwrap_or_default())
}

/// Dispatch the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::List(args) => list::run(&cli.global, args).await,
        Command::Add(args) => add::run(&cli.global, args).await,
        Command::Edit(args) => edit::run(&cli.global, args).await,
        Command::Delete(args) => delete::run(&cli.global, args).await,
    }
}
