use std::{path::PathBuf, str::FromStr, sync::Arc};

use alloy::{
    providers::{Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::layers::RetryBackoffLayer,
};
use eyre::{Result, bail};
use tracing::debug;

use super::{config::Config, rpc_urls::get_chain_info};
use crate::{GenericProvider, models::evm_chain::EVMChain};

pub struct SharedDeps {
    pub provider: Arc<GenericProvider>,
    pub chain: EVMChain,
    pub rpc_url: String,
}

pub async fn init_deps(conn_opts: &ConnOpts) -> Result<SharedDeps> {
    let rpc_url = resolve_rpc_url(conn_opts).await?;

    let provider = init_provider(&rpc_url).await?;
    let provider = Arc::new(provider);

    let chain_id = provider.get_chain_id().await?;
    let chain = EVMChain::new(chain_id, rpc_url.clone());

    Ok(SharedDeps {
        provider,
        chain,
        rpc_url,
    })
}

async fn resolve_rpc_url(conn_opts: &ConnOpts) -> Result<String> {
    match (&conn_opts.rpc_url, conn_opts.chain_id) {
        (Some(url), None) => Ok(url.clone()),
        (None, Some(chain_id)) => {
            let config = Config::load()?;
            if let Some(chain_config) = config.get_chain(chain_id) {
                return Ok(chain_config.rpc_url.clone());
            }

            let chain_info = get_chain_info(chain_id, 1000, 5).await?;
            if chain_info.benchmarked_rpc_urls.is_empty() {
                bail!("No working RPC URLs found for chain ID {}", chain_id)
            }
            Ok(chain_info.benchmarked_rpc_urls[0].0.clone())
        }
        _ => {
            bail!("Either --rpc-url or --chain-id must be specified")
        }
    }
}

pub async fn init_provider(rpc_url: &str) -> Result<GenericProvider> {
    let max_retry = 10;
    let backoff = 1000;
    let cups = 100;
    let retry_layer = RetryBackoffLayer::new(max_retry, backoff, cups);

    debug!("Initializing HTTP provider");
    let client = RpcClient::builder()
        .layer(retry_layer)
        .http(rpc_url.parse()?);

    Ok(ProviderBuilder::new().connect_client(client))
}

pub fn config_path() -> PathBuf {
    home::home_dir().unwrap().join(".rewardlog")
}

#[derive(Clone, Debug, clap::Parser)]
pub struct ConnOpts {
    #[arg(
        long,
        help = "The URL of the HTTP provider",
        env = "ETH_RPC_URL",
        conflicts_with = "chain_id"
    )]
    pub rpc_url: Option<String>,

    #[arg(
        long,
        help = "Chain ID to select an RPC URL from the config file or ChainList",
        conflicts_with = "rpc_url"
    )]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, clap::ValueEnum, PartialEq)]
pub enum OutputFormat {
    Default,
    Json,
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "json" => Ok(Self::Json),
            "json-pretty" => Ok(Self::JsonPretty),
            _ => Err(eyre::eyre!("Invalid output format")),
        }
    }
}
