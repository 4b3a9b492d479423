use alloy::providers::Provider;
use eyre::{Result, eyre};
use rewardlog::misc::args_parsing::BlocksSpec;
use rewardlog::misc::miner::MinerResolver;
use rewardlog::misc::shared_init::{ConnOpts, OutputFormat, init_deps};
use rewardlog::misc::trace_fetch::{TraceBlockResult, fetch_block_traces};
use rewardlog::misc::utils::{measure_end, measure_start};
use rewardlog::models::block_rewards::BlockRewards;
use rewardlog::models::json::block_rewards_json::BlockRewardsJson;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, clap::Parser)]
pub struct BlockArgs {
    #[arg(help = "Block number, 'from:to' range, 'latest' or 'N:' for the last N blocks")]
    blocks: String,

    #[arg(
        long,
        help = "Output format ('default', 'json', 'json-pretty')",
        default_value = "default"
    )]
    format: OutputFormat,

    #[command(flatten)]
    conn_opts: ConnOpts,
}

impl BlockArgs {
    pub async fn run(&self) -> Result<()> {
        let spec: BlocksSpec = self.blocks.parse()?;

        let shared_deps = init_deps(&self.conn_opts).await?;
        let provider = shared_deps.provider;
        let chain = shared_deps.chain;

        let range = spec.resolve(provider.as_ref()).await?;

        let cancel = CancellationToken::new();
        let ctrl_c_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrl_c_cancel.cancel();
            }
        });

        let resolver = MinerResolver::new(&chain);

        for block_number in range.from..=range.to {
            if cancel.is_cancelled() {
                info!("Cancelled, stopping before block {block_number}");
                break;
            }

            let timer = measure_start("block rewards");

            let Some(block) = provider.get_block_by_number(block_number.into()).await? else {
                eyre::bail!("Block {} not found", block_number);
            };

            let mut uncle_headers = Vec::with_capacity(block.uncles.len());
            for idx in 0..block.uncles.len() {
                let uncle = provider
                    .get_uncle(block_number.into(), idx as u64)
                    .await?
                    .ok_or_else(|| eyre!("Uncle {} of block {} not found", idx, block_number))?;
                uncle_headers.push(uncle.header);
            }

            if chain.is_post_merge(block_number) {
                info!("Block {block_number} is post-merge, no mining reward traces expected");
            }

            let trace_entries = match fetch_block_traces(&cancel, &provider, block_number).await {
                TraceBlockResult::Entries(entries) => entries,
                TraceBlockResult::Unavailable => vec![],
            };

            let rewards = BlockRewards::aggregate(
                &trace_entries,
                &block.header,
                &uncle_headers,
                |header| resolver.resolve(header),
            );

            match self.format {
                OutputFormat::Default => rewards.print(block_number, &chain),
                OutputFormat::Json => {
                    let json = BlockRewardsJson::new(&rewards, block_number, &chain);
                    println!("{}", serde_json::to_string(&json)?);
                }
                OutputFormat::JsonPretty => {
                    let json = BlockRewardsJson::new(&rewards, block_number, &chain);
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }

            measure_end(timer);
        }

        Ok(())
    }
}
