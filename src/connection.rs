//! Startup handshake with the node and the block height watcher.

use anyhow::{anyhow, Context, Result};
use ethers_core::types::{Chain, U256};
use ethers_providers::{Http, Middleware, Provider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::artifacts;
use crate::config::Config;
use crate::contract::{rpc_error, AssetRegistry, RwaContract};
use crate::types::ConnectionInfo;

/// Everything a connected app needs: what we learned, a client for
/// background polling, and the shared contract handle.
pub struct Session<M> {
    pub info: ConnectionInfo,
    pub client: Arc<M>,
    pub registry: Arc<dyn AssetRegistry>,
}

pub fn http_provider(rpc_url: &str) -> Result<Arc<Provider<Http>>> {
    let provider = Provider::<Http>::try_from(rpc_url).with_context(|| format!("invalid RPC url '{rpc_url}'"))?;
    Ok(Arc::new(provider))
}

pub async fn connect(cfg: &Config) -> Result<Session<Provider<Http>>> {
    bootstrap(http_provider(&cfg.rpc_url)?, cfg).await
}

/// Chain id, signer, block height, then the contract handle from the
/// persisted address/ABI.
pub async fn bootstrap<M: Middleware + 'static>(client: Arc<M>, cfg: &Config) -> Result<Session<M>> {
    let chain_id = client
        .get_chainid()
        .await
        .map_err(rpc_error)
        .with_context(|| format!("reaching node at {}", cfg.rpc_url))?;

    let account = client
        .get_accounts()
        .await
        .map_err(rpc_error)
        .context("listing node accounts")?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("node at {} exposes no unlocked accounts", cfg.rpc_url))?;

    let block_number = client
        .get_block_number()
        .await
        .map_err(rpc_error)
        .context("reading block height")?
        .as_u64();

    let contract = cfg.resolve_contract_address()?;
    let artifact = artifacts::read_artifact(&cfg.artifact_file())?;

    info!(
        rpc = %cfg.rpc_url,
        network = %network_name(chain_id),
        %chain_id,
        account = ?account,
        block_number,
        contract = ?contract,
        "connected"
    );

    let registry: Arc<dyn AssetRegistry> =
        Arc::new(RwaContract::new(client.clone(), contract, artifact.abi, account));

    Ok(Session {
        info: ConnectionInfo { rpc_url: cfg.rpc_url.clone(), chain_id, account, block_number, contract },
        client,
        registry,
    })
}

/// Human name for well-known chain ids, e.g. `anvil-hardhat` for 31337.
pub fn network_name(chain_id: U256) -> String {
    (chain_id <= U256::from(u64::MAX))
        .then(|| chain_id.as_u64())
        .and_then(|id| Chain::try_from(id).ok())
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Poll the block height and publish changes. Stops when every receiver is gone.
pub fn spawn_block_watcher<M: Middleware + 'static>(
    client: Arc<M>,
    start: u64,
    every: Duration,
) -> (watch::Receiver<u64>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(start);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match client.get_block_number().await {
                Ok(n) => {
                    let n = n.as_u64();
                    if *tx.borrow() != n {
                        debug!(block = n, "new block");
                        if tx.send(n).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "block height poll failed"),
            }
            if tx.is_closed() {
                break;
            }
        }
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{tests::RWA_ABI, ContractArtifact};
    use crate::cli::ConnArgs;
    use ethers_core::types::{Address, U64};
    use ethers_providers::MockProvider;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn config_with_artifact() -> (Config, PathBuf) {
        let dir = std::env::temp_dir().join(format!("rwa-conn-{}", Uuid::new_v4()));
        let artifact: ContractArtifact =
            serde_json::from_str(&format!(r#"{{"contractName":"RWA","abi":{RWA_ABI},"bytecode":"0x"}}"#)).unwrap();
        let contract: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        artifacts::write_deployment(&dir, &artifact, contract).unwrap();

        let cfg = Config::from_args(&ConnArgs {
            rpc_url: "http://127.0.0.1:8545".into(),
            contract_address: None,
            contracts_dir: dir.clone(),
            contract_name: "RWA".into(),
            log_file: dir.join("rwa.log"),
        })
        .unwrap();
        (cfg, dir)
    }

    #[tokio::test]
    async fn bootstrap_collects_signer_height_and_contract() {
        let (cfg, dir) = config_with_artifact();
        let (provider, mock) = Provider::mocked();
        let signer: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();

        // MockProvider answers last-pushed first.
        mock.push::<U64, _>(U64::from(12)).unwrap();
        mock.push::<Vec<Address>, _>(vec![signer, Address::repeat_byte(7)]).unwrap();
        mock.push::<U256, _>(U256::from(31337)).unwrap();

        let session = bootstrap(Arc::new(provider), &cfg).await.unwrap();
        assert_eq!(session.info.chain_id, U256::from(31337));
        assert_eq!(session.info.account, signer);
        assert_eq!(session.info.block_number, 12);
        assert_eq!(session.info.contract, "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse::<Address>().unwrap());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn bootstrap_fails_without_accounts() {
        let (cfg, dir) = config_with_artifact();
        let (provider, mock) = Provider::mocked();
        mock.push::<Vec<Address>, _>(Vec::<Address>::new()).unwrap();
        mock.push::<U256, _>(U256::from(31337)).unwrap();

        let err = bootstrap(Arc::new(provider), &cfg).await.err().unwrap();
        assert!(err.to_string().contains("no unlocked accounts"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn unreachable_node_is_reported() {
        let (cfg, dir) = config_with_artifact();
        let (provider, _mock) = Provider::mocked();

        let err = bootstrap(Arc::new(provider), &cfg).await.err().unwrap();
        assert!(err.to_string().contains("reaching node"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn block_watcher_publishes_new_height() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U64, _>(U64::from(9)).unwrap();

        let (mut rx, handle) = spawn_block_watcher(Arc::new(provider), 5, Duration::from_millis(1));
        assert_eq!(*rx.borrow(), 5);
        tokio::time::timeout(Duration::from_secs(2), rx.changed()).await.unwrap().unwrap();
        assert_eq!(*rx.borrow(), 9);
        handle.abort();
    }

    #[tokio::test]
    async fn block_watcher_stops_when_nobody_listens() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U64, _>(U64::from(6)).unwrap();

        let (rx, handle) = spawn_block_watcher(Arc::new(provider), 5, Duration::from_millis(1));
        drop(rx);
        tokio::time::timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
    }

    #[test]
    fn local_chain_has_a_name() {
        assert_ne!(network_name(U256::from(31337)), "unknown");
        assert_eq!(network_name(U256::from(987_654_321u64)), "unknown");
    }
}
