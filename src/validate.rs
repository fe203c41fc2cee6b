//! Client-side form checks. The contract stays the authority; these only keep
//! obviously bad input off the network.

use ethers_core::types::{Address, U256};
use ethers_core::utils::parse_ether;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::types::AssetType;

/// Validated `tokenizeAsset` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeArgs {
    pub name: String,
    pub asset_type: AssetType,
    /// 18-decimal fixed point.
    pub value: U256,
}

/// Validated `transferAsset` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferArgs {
    pub id: U256,
    pub new_owner: Address,
    /// The address as typed, for echoing back.
    pub new_owner_text: String,
}

fn address_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("static address regex"))
}

pub fn tokenize_args(name: &str, asset_type: &str, value: &str) -> Result<TokenizeArgs, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let asset_type = asset_type.trim();
    if asset_type.is_empty() {
        return Err(ValidationError::EmptyAssetType);
    }
    let asset_type: AssetType = asset_type.parse().map_err(|_| ValidationError::UnknownAssetType(asset_type.to_string()))?;

    Ok(TokenizeArgs { name: name.to_string(), asset_type, value: asset_value(value)? })
}

/// Positive decimal amount, scaled to 18 decimals.
pub fn asset_value(value: &str) -> Result<U256, ValidationError> {
    let value = value.trim();
    let plain_decimal = value.bytes().any(|b| b.is_ascii_digit())
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && value.matches('.').count() <= 1;
    let decimals = value.split_once('.').map_or(0, |(_, frac)| frac.len());
    if !plain_decimal || decimals > 18 {
        return Err(ValidationError::InvalidValue);
    }
    let scaled = parse_ether(value).map_err(|_| ValidationError::InvalidValue)?;
    if scaled.is_zero() {
        return Err(ValidationError::InvalidValue);
    }
    Ok(scaled)
}

pub fn asset_id(id: &str) -> Result<U256, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyAssetId);
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidAssetId);
    }
    U256::from_dec_str(id).map_err(|_| ValidationError::InvalidAssetId)
}

pub fn owner_address(addr: &str) -> Result<Address, ValidationError> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(ValidationError::EmptyOwner);
    }
    if !address_pattern().is_match(addr) {
        return Err(ValidationError::InvalidAddress);
    }
    addr.parse().map_err(|_| ValidationError::InvalidAddress)
}

pub fn transfer_args(id: &str, new_owner: &str) -> Result<TransferArgs, ValidationError> {
    Ok(TransferArgs {
        id: asset_id(id)?,
        new_owner: owner_address(new_owner)?,
        new_owner_text: new_owner.trim().to_string(),
    })
}
