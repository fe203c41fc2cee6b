//! One-shot deployment: publish the compiled contract from the node's first
//! unlocked account and persist `{address, abi}` for the app.

use anyhow::{anyhow, bail, Context, Result};
use ethers_core::types::{Address, TransactionRequest, U256, U64};
use ethers_core::utils::format_ether;
use ethers_providers::Middleware;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::artifacts::{self, ContractArtifact};
use crate::config::Config;
use crate::connection::{http_provider, network_name};
use crate::contract::rpc_error;

#[derive(Debug)]
pub struct Deployment {
    pub contract_name: String,
    pub address: Address,
    pub deployer: Address,
    pub deployer_balance: U256,
    pub network: String,
    pub chain_id: U256,
    pub address_file: PathBuf,
    pub artifact_file: PathBuf,
}

pub async fn run(cfg: &Config, artifact_path: &Path) -> Result<Deployment> {
    let artifact = artifacts::read_artifact(artifact_path)?;
    if artifact.bytecode.is_empty() {
        bail!("{} has no bytecode; compile the contract first", artifact_path.display());
    }
    println!("Deploying {} contract...", artifact.contract_name);

    let client = http_provider(&cfg.rpc_url)?;
    let deployment = deploy(client, &artifact, &cfg.contracts_dir).await?;

    println!("✓ {} deployed to: {:#x}", deployment.contract_name, deployment.address);
    println!("  Network: {}", deployment.network);
    println!("  Chain ID: {}", deployment.chain_id);
    println!("  Deployed by: {:#x}", deployment.deployer);
    println!("  Account balance: {} ETH", format_ether(deployment.deployer_balance));
    println!("✓ Contract address saved to {}", deployment.address_file.display());
    println!("✓ Contract ABI saved to {}", deployment.artifact_file.display());
    println!();
    println!("Next steps:");
    println!("  1. Keep the local node running");
    println!("  2. Run `rwa` to open the console");
    Ok(deployment)
}

pub async fn deploy<M: Middleware + 'static>(
    client: Arc<M>,
    artifact: &ContractArtifact,
    contracts_dir: &Path,
) -> Result<Deployment> {
    let chain_id = client.get_chainid().await.map_err(rpc_error).context("reading chain id")?;
    let deployer = client
        .get_accounts()
        .await
        .map_err(rpc_error)
        .context("listing node accounts")?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("node exposes no unlocked accounts"))?;
    let balance = client.get_balance(deployer, None).await.map_err(rpc_error).context("reading deployer balance")?;

    info!(network = %network_name(chain_id), %chain_id, deployer = ?deployer, balance = %format_ether(balance), "deploying");

    let tx = TransactionRequest::new().from(deployer).data(artifact.bytecode.clone());
    let pending = client.send_transaction(tx, None).await.map_err(rpc_error).context("sending deployment transaction")?;
    let tx_hash = pending.tx_hash();
    let receipt = pending
        .await
        .with_context(|| format!("waiting for deployment {tx_hash:#x}"))?
        .ok_or_else(|| anyhow!("deployment transaction {tx_hash:#x} dropped"))?;

    if receipt.status == Some(U64::zero()) {
        bail!("deployment transaction {tx_hash:#x} reverted");
    }
    let address = receipt
        .contract_address
        .ok_or_else(|| anyhow!("receipt for {tx_hash:#x} has no contract address"))?;

    let (address_file, artifact_file) = artifacts::write_deployment(contracts_dir, artifact, address)?;
    info!(contract = %artifact.contract_name, address = ?address, tx = ?tx_hash, "deployed");

    Ok(Deployment {
        contract_name: artifact.contract_name.clone(),
        address,
        deployer,
        deployer_balance: balance,
        network: network_name(chain_id),
        chain_id,
        address_file,
        artifact_file,
    })
}
