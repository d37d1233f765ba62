use clap::{Args, Subcommand};
use storefront_app::domain::stores::records::StoreName;

mod show;
mod uninstall;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    /// Print the live record for a store
    Show(show::ShowStoreArgs),

    /// Soft-delete the live record for a store
    Uninstall(uninstall::UninstallStoreArgs),
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Show(args) => show::run(args).await,
        StoreSubcommand::Uninstall(args) => uninstall::run(args).await,
    }
}

fn parse_name(name: &str) -> Result<StoreName, String> {
    StoreName::parse(name).map_err(|error| error.to_string())
}
