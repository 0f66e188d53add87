use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sokushuu")]
#[command(about = "Sokushuu testnet faucet client", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the selectable networks
    Chains,

    /// Show the balance of an address
    Balance {
        /// Chain id
        #[arg(long)]
        chain: u64,

        /// Account address (0x-prefixed)
        #[arg(long)]
        address: String,
    },

    /// Request a token grant from the faucet
    Claim {
        /// Chain id
        #[arg(long)]
        chain: u64,

        /// Recipient address (0x-prefixed)
        #[arg(long)]
        address: String,
    },
}
