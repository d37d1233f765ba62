use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use storefront_app::database;

mod db;
mod store;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Store(store::StoreCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Store(command) => store::run(command).await,
        }
    }
}

/// Connection arguments shared by every command.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
