//! Files shared between the deploy step and the app:
//! `contract-address.json` (name -> address) and `<Name>.json` (compiled artifact).

use anyhow::{anyhow, Context, Result};
use ethers_core::abi::Abi;
use ethers_core::types::{Address, Bytes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::Defaults;

/// Deployed addresses keyed by contract name, e.g. `{ "RWA": "0x…" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddresses(pub BTreeMap<String, Address>);

impl ContractAddresses {
    pub fn get(&self, name: &str) -> Option<Address> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: &str, addr: Address) {
        self.0.insert(name.to_string(), addr);
    }
}

/// Compiled contract as emitted by Hardhat. Fields we don't use are carried
/// through untouched so the copy in the contracts dir matches the compiler output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    #[serde(default)]
    pub bytecode: Bytes,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub fn address_file(dir: &Path) -> PathBuf {
    dir.join(Defaults::ADDRESS_FILE)
}

pub fn artifact_file(dir: &Path, contract_name: &str) -> PathBuf {
    dir.join(format!("{contract_name}.json"))
}

pub fn read_artifact(path: &Path) -> Result<ContractArtifact> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing contract artifact {}", path.display()))
}

pub fn read_addresses(path: &Path) -> Result<ContractAddresses> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Deployed address of `contract_name` from the contracts dir.
pub fn deployed_address(dir: &Path, contract_name: &str) -> Result<Address> {
    let path = address_file(dir);
    read_addresses(&path)?
        .get(contract_name)
        .ok_or_else(|| anyhow!("no address for '{}' in {}", contract_name, path.display()))
}

/// Write both files into `dir`, creating it if needed. Returns the two paths.
pub fn write_deployment(dir: &Path, artifact: &ContractArtifact, addr: Address) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;

    let mut addresses = ContractAddresses::default();
    addresses.insert(&artifact.contract_name, addr);

    let addr_path = address_file(dir);
    fs::write(&addr_path, serde_json::to_string_pretty(&addresses)?)
        .with_context(|| format!("writing {}", addr_path.display()))?;

    let artifact_path = artifact_file(dir, &artifact.contract_name);
    fs::write(&artifact_path, serde_json::to_string_pretty(artifact)?)
        .with_context(|| format!("writing {}", artifact_path.display()))?;

    Ok((addr_path, artifact_path))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use uuid::Uuid;

    /// Minimal ABI of the asset registry contract.
    pub(crate) const RWA_ABI: &str = r#"[
      {"type":"function","name":"tokenizeAsset","stateMutability":"nonpayable",
       "inputs":[{"name":"_name","type":"string"},{"name":"_assetType","type":"string"},{"name":"_value","type":"uint256"}],
       "outputs":[{"name":"","type":"uint256"}]},
      {"type":"function","name":"getAsset","stateMutability":"view",
       "inputs":[{"name":"_id","type":"uint256"}],
       "outputs":[{"name":"","type":"uint256"},{"name":"","type":"string"},{"name":"","type":"string"},
                  {"name":"","type":"uint256"},{"name":"","type":"address"},{"name":"","type":"uint256"}]},
      {"type":"function","name":"transferAsset","stateMutability":"nonpayable",
       "inputs":[{"name":"_id","type":"uint256"},{"name":"_newOwner","type":"address"}],"outputs":[]},
      {"type":"event","name":"AssetTokenized","anonymous":false,
       "inputs":[{"name":"id","type":"uint256","indexed":true},{"name":"name","type":"string","indexed":false},
                 {"name":"owner","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
      {"type":"event","name":"AssetTransferred","anonymous":false,
       "inputs":[{"name":"id","type":"uint256","indexed":true},{"name":"from","type":"address","indexed":true},
                 {"name":"to","type":"address","indexed":true}]}
    ]"#;

    pub(crate) fn rwa_abi() -> Abi {
        serde_json::from_str(RWA_ABI).unwrap()
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("rwa-artifacts-{}", Uuid::new_v4()))
    }

    fn hardhat_artifact_json() -> String {
        format!(
            r#"{{"_format":"hh-sol-artifact-1","contractName":"RWA","sourceName":"contracts/RWA.sol",
                "abi":{RWA_ABI},"bytecode":"0x6080604052","deployedBytecode":"0x6080",
                "linkReferences":{{}},"deployedLinkReferences":{{}}}}"#
        )
    }

    #[test]
    fn reads_hardhat_artifact_and_keeps_extra_fields() {
        let artifact: ContractArtifact = serde_json::from_str(&hardhat_artifact_json()).unwrap();
        assert_eq!(artifact.contract_name, "RWA");
        assert!(artifact.abi.function("getAsset").is_ok());
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(artifact.extra["sourceName"], "contracts/RWA.sol");

        let back = serde_json::to_value(&artifact).unwrap();
        assert_eq!(back["_format"], "hh-sol-artifact-1");
        assert_eq!(back["contractName"], "RWA");
    }

    #[test]
    fn deployment_files_are_written_and_read_back() {
        let dir = scratch_dir();
        let artifact: ContractArtifact = serde_json::from_str(&hardhat_artifact_json()).unwrap();
        let addr: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();

        let (addr_path, artifact_path) = write_deployment(&dir, &artifact, addr).unwrap();
        assert_eq!(addr_path, dir.join("contract-address.json"));
        assert_eq!(artifact_path, dir.join("RWA.json"));

        assert_eq!(deployed_address(&dir, "RWA").unwrap(), addr);
        assert!(deployed_address(&dir, "Other").is_err());

        let reread = read_artifact(&artifact_path).unwrap();
        assert!(reread.abi.function("transferAsset").is_ok());
        assert!(reread.abi.event("AssetTokenized").is_ok());
        assert_eq!(reread.bytecode, artifact.bytecode);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&addr_path).unwrap()).unwrap();
        assert_eq!(raw["RWA"], "0x5fbdb2315678afecb367f032d93f642f64180aa3");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_address_file_is_an_error() {
        let dir = scratch_dir();
        let err = deployed_address(&dir, "RWA").unwrap_err();
        assert!(format!("{err:#}").contains("contract-address.json"));
    }
}
