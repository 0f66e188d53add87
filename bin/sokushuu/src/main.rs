mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use sokushuu_chain::{Address, ChainId, ChainRegistry};
use sokushuu_faucet::{ClaimWorkflow, ClaimSubmitter, FaucetClientConfig};
use sokushuu_wallet::{format_amount, BalanceObserver, RpcBalanceSource};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let env_filter = if args.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = FaucetClientConfig::from_env().context("loading configuration")?;
    let registry = Arc::new(ChainRegistry::with_default_chains(
        &config.private_endpoints(),
    ));
    let observer = Arc::new(BalanceObserver::new(Arc::new(RpcBalanceSource::new(
        &registry,
    ))));

    match args.command {
        cli::Commands::Chains => {
            for entry in registry.list() {
                println!(
                    "{:>8}  {}  rpc={}  explorer={}",
                    entry.id.0, entry.name, entry.rpc_http_uri, entry.block_explorer_uri
                );
            }
        }
        cli::Commands::Balance { chain, address } => {
            let chain = ChainId(chain);
            let metadata = registry
                .metadata_for(chain)
                .with_context(|| format!("unknown chain id {}", chain))?;
            let address: Address = address.parse().context("parsing address")?;

            let balance = observer
                .observe(chain, Some(&address))
                .await?
                .context("balance did not resolve")?;
            println!(
                "{} {}",
                format_amount(balance.amount, metadata.currency_decimals),
                balance.symbol
            );
        }
        cli::Commands::Claim { chain, address } => {
            let chain = ChainId(chain);
            let metadata = registry
                .metadata_for(chain)
                .filter(|entry| entry.listed)
                .with_context(|| format!("unknown or unlisted chain id {}", chain))?;
            let decimals = metadata.currency_decimals;
            info!("Claiming on {} for {}", metadata.name, address);

            let mut workflow = ClaimWorkflow::new(
                Arc::clone(&registry),
                Arc::clone(&observer),
                ClaimSubmitter::new(config.backend_base_uri.clone()),
                config.faucet_address.clone(),
            );
            if !workflow.select_chain(chain) {
                bail!("unknown or unlisted chain id {}", chain);
            }
            workflow.close_chain_selection();
            workflow.set_address(address);

            workflow.submit().await;

            if let Some(message) = &workflow.state().message {
                bail!("{}", message);
            }

            let tx_hash = workflow
                .state()
                .tx_hash
                .clone()
                .context("claim settled without a transaction hash")?;
            println!("Claimed: {}", tx_hash);
            if let Some(link) = workflow.explorer_tx_uri() {
                println!("Explorer: {}", link);
            }

            let (faucet_balance, user_balance) =
                tokio::join!(workflow.faucet_balance(), workflow.user_balance());
            if let Some(balance) = faucet_balance? {
                println!(
                    "Faucet balance: {} {}",
                    format_amount(balance.amount, decimals),
                    balance.symbol
                );
            }
            if let Some(balance) = user_balance? {
                println!(
                    "Your balance: {} {}",
                    format_amount(balance.amount, decimals),
                    balance.symbol
                );
            }
        }
    }

    Ok(())
}
