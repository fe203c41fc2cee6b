use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::connection::{self, network_name};
use crate::types::ConnectionInfo;
use crate::util::addr_to_0x;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub rpc_url: String,
    pub network: String,
    pub chain_id: String,
    pub account: String,
    pub latest_block: u64,
    pub contract: String,
}

impl From<&ConnectionInfo> for StatusReport {
    fn from(info: &ConnectionInfo) -> Self {
        Self {
            rpc_url: info.rpc_url.clone(),
            network: network_name(info.chain_id),
            chain_id: info.chain_id.to_string(),
            account: addr_to_0x(&info.account),
            latest_block: info.block_number,
            contract: addr_to_0x(&info.contract),
        }
    }
}

pub async fn run(cfg: &Config) -> Result<StatusReport> {
    let session = connection::connect(cfg).await?;
    let report = StatusReport::from(&session.info);
    println!("✓ Connected to {}", report.rpc_url);
    println!("  Network:      {} (chain {})", report.network, report.chain_id);
    println!("  Account:      {}", report.account);
    println!("  Latest block: #{}", report.latest_block);
    println!("  Contract:     {}", report.contract);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::{Address, U256};

    #[test]
    fn report_uses_lowercase_hex_and_decimal_chain_id() {
        let info = ConnectionInfo {
            rpc_url: "http://127.0.0.1:8545".into(),
            chain_id: U256::from(31337),
            account: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap(),
            block_number: 5,
            contract: Address::repeat_byte(0x5f),
        };
        let report = StatusReport::from(&info);
        assert_eq!(report.chain_id, "31337");
        assert_eq!(report.account, "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["latestBlock"], 5);
    }
}
