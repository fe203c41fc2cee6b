use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::defaults::Defaults;

/// RWA tokenization console: terminal UI plus one-shot contract commands
#[derive(Parser, Debug)]
#[command(version, about = "Tokenize, query and transfer real-world assets on a local chain")]
pub struct Cli {
    #[command(flatten)]
    pub conn: ConnArgs,

    /// Omit to launch the terminal UI
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

/// Where the node and the deployment artifacts live.
#[derive(Args, Debug, Clone)]
pub struct ConnArgs {
    /// JSON-RPC endpoint of the local chain
    #[arg(long, global = true, env = "RWA_RPC_URL", default_value = Defaults::RPC_URL)]
    pub rpc_url: String,

    /// Use this contract address instead of the one in contract-address.json
    #[arg(long, global = true, env = "RWA_CONTRACT_ADDRESS")]
    pub contract_address: Option<String>,

    /// Directory holding contract-address.json and the contract ABI
    #[arg(long, global = true, env = "RWA_CONTRACTS_DIR", default_value = Defaults::CONTRACTS_DIR)]
    pub contracts_dir: PathBuf,

    /// Contract name used as key in contract-address.json and as ABI file stem
    #[arg(long, global = true, env = "RWA_CONTRACT_NAME", default_value = Defaults::CONTRACT_NAME)]
    pub contract_name: String,

    /// Log file used while the terminal UI owns the screen
    #[arg(long, global = true, env = "RWA_LOG_FILE", default_value = Defaults::LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the terminal UI (default)
    Tui,

    /// Deploy the compiled contract and write its address/ABI to the contracts dir
    Deploy {
        /// Compiled contract artifact (Hardhat JSON with abi + bytecode)
        #[arg(long, default_value = Defaults::ARTIFACT_PATH)]
        artifact: PathBuf,
    },

    /// Show chain, account, block height and contract address
    Status,

    /// Create a new asset record on-chain
    Tokenize {
        /// Asset name
        #[arg(long)]
        name: String,

        /// One of: Real Estate, Vehicle, Art, Jewelry, Equipment, Intellectual Property, Other
        #[arg(long)]
        asset_type: String,

        /// Asset value in USD (decimal)
        #[arg(long)]
        value: String,
    },

    /// Look up an asset by id
    Query {
        /// Asset id
        #[arg(long)]
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer an asset to a new owner
    Transfer {
        /// Asset id
        #[arg(long)]
        id: String,

        /// New owner address (0x + 40 hex chars)
        #[arg(long)]
        to: String,
    },
}
