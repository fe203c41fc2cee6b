//! Flow errors: local validation failures and remote (RPC/contract) failures.

use ethers_core::abi::{self, ParamType, Token};
use ethers_providers::JsonRpcError;
use std::fmt;
use thiserror::Error;

/// Raised before any network contact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter asset name")]
    EmptyName,

    #[error("Please select asset type")]
    EmptyAssetType,

    #[error("Unknown asset type: {0}")]
    UnknownAssetType(String),

    #[error("Please enter a valid asset value")]
    InvalidValue,

    #[error("Please enter an asset ID")]
    EmptyAssetId,

    #[error("Asset ID must be a whole number")]
    InvalidAssetId,

    #[error("Please enter new owner address")]
    EmptyOwner,

    #[error("Invalid Ethereum address format")]
    InvalidAddress,

    #[error("Contract not initialized")]
    NotConnected,
}

/// A failed RPC call or contract execution.
///
/// `reason` holds the contract's revert string when one could be recovered;
/// `message` holds whatever the node or transport said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteError {
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("Unknown error"))
    }
}

impl std::error::Error for RemoteError {}

impl RemoteError {
    pub fn message(message: impl Into<String>) -> Self {
        Self { reason: None, message: Some(message.into()) }
    }

    pub fn reverted(reason: impl Into<String>) -> Self {
        Self { reason: Some(reason.into()), message: None }
    }

    /// Build from a JSON-RPC error response, digging the revert reason out of
    /// the `data` payload or the node's message.
    pub fn from_rpc(err: &JsonRpcError) -> Self {
        let reason = err
            .data
            .as_ref()
            .and_then(reason_from_data)
            .or_else(|| reason_from_message(&err.message));
        Self { reason, message: Some(err.message.clone()) }
    }

    /// Reason, else message, else `fallback`.
    pub fn describe(&self, fallback: &str) -> String {
        self.reason
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Reason, else `fallback`. Used where the raw node message is not useful to show.
    pub fn reason_or(&self, fallback: &str) -> String {
        self.reason
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Either side of a flow failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Selector of Solidity's `Error(string)`.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Revert data may be a bare hex string or nested as `{ "data": "0x…" }`.
fn reason_from_data(data: &serde_json::Value) -> Option<String> {
    match data {
        serde_json::Value::String(s) => decode_error_string(s),
        serde_json::Value::Object(map) => map.get("data").and_then(reason_from_data),
        _ => None,
    }
}

pub fn decode_error_string(hex0x: &str) -> Option<String> {
    let raw = hex::decode(hex0x.strip_prefix("0x").unwrap_or(hex0x)).ok()?;
    if raw.len() < 4 || raw[..4] != ERROR_STRING_SELECTOR {
        return None;
    }
    match abi::decode(&[ParamType::String], &raw[4..]).ok()?.pop()? {
        Token::String(s) => Some(s),
        _ => None,
    }
}

fn reason_from_message(message: &str) -> Option<String> {
    const MARKER: &str = "reverted with reason string '";
    let start = message.find(MARKER)? + MARKER.len();
    let rest = &message[start..];
    let end = rest.rfind('\'')?;
    Some(rest[..end].to_string())
}
