use clap::Args;
use storefront_app::domain::stores::{PgStoresService, StoresService, StoresServiceError};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct UninstallStoreArgs {
    /// Store domain, e.g. `acme.myshopify.com`
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: UninstallStoreArgs) -> Result<(), String> {
    let name = super::parse_name(&args.name)?;
    let service = PgStoresService::new(args.database.connect().await?);

    match service.delete_store(&name).await {
        Ok(()) => {
            println!("uninstalled store {name}");
            Ok(())
        }
        Err(StoresServiceError::NotFound) => Err(format!("store {name} not found")),
        Err(error) => Err(format!("failed to uninstall store: {error}")),
    }
}
