use context_module_nft::datasource::Client;
use context_module_nft::NftContextLoader;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use crate::core::context::Context;
use crate::core::{Error, Fmt};

mod core;
mod runner;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let context = Context::load()?;

    let subscriber = Registry::default().with(Fmt::layer(&context.configuration.verbosity));
    tracing::subscriber::set_global_default(subscriber).map_err(|e| Error::Configuration(e.to_string()))?;

    let loader = NftContextLoader::new(Client::new(&context.configuration.data_source)?);
    let options = context.configuration.loader_options();

    info!(chain_id = options.chain_id, "reading transactions from stdin");
    let processed = runner::run(&loader, &options, BufReader::new(stdin()), stdout()).await?;

    info!(processed, "input closed");
    Ok(())
}
