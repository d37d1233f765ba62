use clap::Args;
use storefront_app::domain::stores::{PgStoresService, StoresService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowStoreArgs {
    /// Store domain, e.g. `acme.myshopify.com`
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ShowStoreArgs) -> Result<(), String> {
    let name = super::parse_name(&args.name)?;
    let service = PgStoresService::new(args.database.connect().await?);

    let store = service
        .get_store(&name)
        .await
        .map_err(|error| format!("failed to load store: {error}"))?
        .ok_or_else(|| format!("store {name} not found"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);
    println!("installed: {}", store.installed);
    println!("has_access_token: {}", store.access_token.is_some());
    println!("install_pending: {}", store.nonce.is_some());
    println!("created_at: {}", store.created_at);
    println!("updated_at: {}", store.updated_at);

    Ok(())
}
