mod cmd;
use clap::{Parser, Subcommand};
use cmd::{block::BlockArgs, chains::ChainsArgs, rpc_urls::RpcUrlsArgs};
use eyre::Result;
use rewardlog::misc::utils::init_logs;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "rewardlog: EVM block reward inspection CLI"
)]
pub struct RLArgs {
    #[command(subcommand)]
    pub cmd: RLSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RLSubcommand {
    #[command(about = "Reconstruct mining rewards for a block or range", alias = "b")]
    Block(BlockArgs),
    #[command(about = "List known chains")]
    Chains(ChainsArgs),
    #[command(about = "Find working RPC URLs for a chain")]
    RpcUrls(RpcUrlsArgs),
}

#[tokio::main]
async fn main() {
    init_logs();
    match execute().await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

type RL = RLSubcommand;

async fn execute() -> Result<()> {
    let args = RLArgs::parse();

    match args.cmd {
        RL::Block(args) => {
            args.run().await?;
        }
        RL::Chains(args) => {
            args.run().await?;
        }
        RL::RpcUrls(args) => {
            args.run().await?;
        }
    }

    Ok(())
}
