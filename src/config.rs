//! Runtime configuration, resolved from CLI flags, then environment (including
//! `.env`), then [`Defaults`](crate::defaults::Defaults).

use anyhow::{Context, Result};
use ethers_core::types::Address;
use std::path::PathBuf;

use crate::artifacts;
use crate::cli::ConnArgs;
use crate::validate;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub contract_address: Option<Address>,
    pub contracts_dir: PathBuf,
    pub contract_name: String,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: &ConnArgs) -> Result<Self> {
        let contract_address = args
            .contract_address
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| validate::owner_address(s).with_context(|| format!("contract address override '{s}'")))
            .transpose()?;

        Ok(Self {
            rpc_url: args.rpc_url.trim().to_string(),
            contract_address,
            contracts_dir: args.contracts_dir.clone(),
            contract_name: args.contract_name.clone(),
            log_file: args.log_file.clone(),
        })
    }

    pub fn address_file(&self) -> PathBuf {
        artifacts::address_file(&self.contracts_dir)
    }

    pub fn artifact_file(&self) -> PathBuf {
        artifacts::artifact_file(&self.contracts_dir, &self.contract_name)
    }

    /// Override if set, else the address written by the deploy step.
    pub fn resolve_contract_address(&self) -> Result<Address> {
        match self.contract_address {
            Some(addr) => Ok(addr),
            None => artifacts::deployed_address(&self.contracts_dir, &self.contract_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::Defaults;

    fn args(contract_address: Option<&str>) -> ConnArgs {
        ConnArgs {
            rpc_url: " http://127.0.0.1:8545 ".into(),
            contract_address: contract_address.map(Into::into),
            contracts_dir: PathBuf::from("/nonexistent/contracts"),
            contract_name: "RWA".into(),
            log_file: PathBuf::from(Defaults::LOG_FILE),
        }
    }

    #[test]
    fn override_wins_over_address_file() {
        let cfg = Config::from_args(&args(Some("0x5FbDB2315678afecb367f032d93F642f64180aa3"))).unwrap();
        assert_eq!(cfg.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(
            cfg.resolve_contract_address().unwrap(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn blank_override_is_ignored() {
        let cfg = Config::from_args(&args(Some("  "))).unwrap();
        assert!(cfg.contract_address.is_none());
        assert!(cfg.resolve_contract_address().is_err());
    }

    #[test]
    fn malformed_override_is_rejected() {
        let err = Config::from_args(&args(Some("0x1234"))).unwrap_err();
        assert!(format!("{err:#}").contains("0x1234"));
    }

    #[test]
    fn artifact_paths_follow_contract_name() {
        let cfg = Config::from_args(&args(None)).unwrap();
        assert_eq!(cfg.address_file(), PathBuf::from("/nonexistent/contracts/contract-address.json"));
        assert_eq!(cfg.artifact_file(), PathBuf::from("/nonexistent/contracts/RWA.json"));
    }
}
