//! Form-to-call adapters: validate -> call -> await -> notify.
//!
//! Each flow is split into a synchronous `check_*` (local validation, never
//! touches the network) and an async `run_*` (one contract call). The TUI
//! validates on the event loop and spawns only the call; the CLI uses the
//! combined helpers.

use ethers_core::types::{H256, U256};
use tracing::{info, warn};

use crate::contract::{AssetRegistry, Tokenized};
use crate::error::{FlowError, ValidationError};
use crate::notify::{Notice, Notifier};
use crate::types::Asset;
use crate::util::shorten_hex;
use crate::validate::{self, TokenizeArgs, TransferArgs};

const SUBMITTED: &str = "Transaction submitted";
const WAITING: &str = "Waiting for confirmation...";

fn rejected(notifier: &dyn Notifier, err: ValidationError) -> FlowError {
    warn!(%err, "input rejected");
    notifier.notify(Notice::error(err.to_string()));
    FlowError::Invalid(err)
}

/* ---------- tokenize ---------- */

pub fn check_tokenize(
    notifier: &dyn Notifier,
    name: &str,
    asset_type: &str,
    value: &str,
) -> Result<TokenizeArgs, FlowError> {
    validate::tokenize_args(name, asset_type, value).map_err(|e| rejected(notifier, e))
}

pub async fn run_tokenize(
    registry: &dyn AssetRegistry,
    notifier: &dyn Notifier,
    args: TokenizeArgs,
) -> Result<Tokenized, FlowError> {
    notifier.notify(Notice::info(SUBMITTED).with_description(WAITING));
    match registry.tokenize_asset(&args.name, args.asset_type.label(), args.value).await {
        Ok(done) => {
            let id = done.asset_id.map(|id| id.to_string()).unwrap_or_else(|| "N/A".to_string());
            info!(asset_id = %id, name = %args.name, "tokenized");
            notifier.notify(Notice::success("Asset tokenized successfully!").with_description(format!("Asset ID: {id}")));
            Ok(done)
        }
        Err(err) => {
            warn!(%err, "tokenize failed");
            notifier.notify(Notice::error("Failed to tokenize asset").with_description(err.describe("Unknown error")));
            Err(err.into())
        }
    }
}

pub async fn tokenize(
    registry: &dyn AssetRegistry,
    notifier: &dyn Notifier,
    name: &str,
    asset_type: &str,
    value: &str,
) -> Result<Tokenized, FlowError> {
    let args = check_tokenize(notifier, name, asset_type, value)?;
    run_tokenize(registry, notifier, args).await
}

/* ---------- query ---------- */

pub fn check_query(notifier: &dyn Notifier, id: &str) -> Result<U256, FlowError> {
    validate::asset_id(id).map_err(|e| rejected(notifier, e))
}

pub async fn run_query(registry: &dyn AssetRegistry, notifier: &dyn Notifier, id: U256) -> Result<Asset, FlowError> {
    match registry.get_asset(id).await {
        Ok(asset) => {
            info!(%id, "asset retrieved");
            notifier.notify(Notice::success("Asset retrieved successfully"));
            Ok(asset)
        }
        Err(err) => {
            warn!(%id, %err, "query failed");
            notifier.notify(Notice::error("Failed to query asset").with_description(err.reason_or("Asset may not exist")));
            Err(err.into())
        }
    }
}

pub async fn query(registry: &dyn AssetRegistry, notifier: &dyn Notifier, id: &str) -> Result<Asset, FlowError> {
    let id = check_query(notifier, id)?;
    run_query(registry, notifier, id).await
}

/* ---------- transfer ---------- */

pub fn check_transfer(notifier: &dyn Notifier, id: &str, new_owner: &str) -> Result<TransferArgs, FlowError> {
    validate::transfer_args(id, new_owner).map_err(|e| rejected(notifier, e))
}

pub async fn run_transfer(
    registry: &dyn AssetRegistry,
    notifier: &dyn Notifier,
    args: TransferArgs,
) -> Result<H256, FlowError> {
    notifier.notify(Notice::info(SUBMITTED).with_description(WAITING));
    match registry.transfer_asset(args.id, args.new_owner).await {
        Ok(tx_hash) => {
            notifier.notify(Notice::success("Asset transferred successfully!").with_description(transfer_summary(args.id, &args.new_owner_text)));
            Ok(tx_hash)
        }
        Err(err) => {
            warn!(id = %args.id, %err, "transfer failed");
            notifier.notify(Notice::error("Failed to transfer asset").with_description(err.describe("Unknown error")));
            Err(err.into())
        }
    }
}

pub async fn transfer(
    registry: &dyn AssetRegistry,
    notifier: &dyn Notifier,
    id: &str,
    new_owner: &str,
) -> Result<H256, FlowError> {
    let args = check_transfer(notifier, id, new_owner)?;
    run_transfer(registry, notifier, args).await
}

pub fn transfer_summary(id: U256, new_owner: &str) -> String {
    format!("Asset #{id} transferred to {}", shorten_hex(new_owner))
}
