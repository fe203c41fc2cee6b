//! Typed handle over the deployed asset registry contract.
//!
//! Calldata is encoded from the runtime ABI and sent through any ethers
//! `Middleware`; transactions go out as `eth_sendTransaction` from the node's
//! unlocked account.

use async_trait::async_trait;
use ethers_core::abi::{Abi, Function, RawLog, Token};
use ethers_core::types::{
    transaction::eip2718::TypedTransaction, Address, TransactionReceipt, TransactionRequest, H256,
    U256, U64,
};
use ethers_providers::{Middleware, MiddlewareError};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::RemoteError;
use crate::types::Asset;

pub const FN_TOKENIZE: &str = "tokenizeAsset";
pub const FN_GET: &str = "getAsset";
pub const FN_TRANSFER: &str = "transferAsset";
pub const EV_TOKENIZED: &str = "AssetTokenized";

/// Result of a mined `tokenizeAsset` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub tx_hash: H256,
    /// `None` when the receipt carried no `AssetTokenized` log.
    pub asset_id: Option<U256>,
}

/// The three contract methods the app uses.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    async fn tokenize_asset(&self, name: &str, asset_type: &str, value: U256) -> Result<Tokenized, RemoteError>;
    async fn get_asset(&self, id: U256) -> Result<Asset, RemoteError>;
    async fn transfer_asset(&self, id: U256, new_owner: Address) -> Result<H256, RemoteError>;
}

pub struct RwaContract<M> {
    client: Arc<M>,
    address: Address,
    abi: Abi,
    from: Address,
}

impl<M: Middleware> RwaContract<M> {
    pub fn new(client: Arc<M>, address: Address, abi: Abi, from: Address) -> Self {
        Self { client, address, abi, from }
    }

    fn function(&self, name: &str) -> Result<&Function, RemoteError> {
        self.abi
            .function(name)
            .map_err(|_| RemoteError::message(format!("function '{name}' not in contract ABI")))
    }

    fn encode(&self, name: &str, args: &[Token]) -> Result<Vec<u8>, RemoteError> {
        self.function(name)?
            .encode_input(args)
            .map_err(|e| RemoteError::message(format!("encoding {name}: {e}")))
    }

    /// Send from the unlocked account and wait for the receipt.
    async fn send(&self, data: Vec<u8>) -> Result<TransactionReceipt, RemoteError> {
        let tx = TransactionRequest::new().from(self.from).to(self.address).data(data);
        let pending = self.client.send_transaction(tx, None).await.map_err(rpc_error)?;
        let tx_hash = pending.tx_hash();
        debug!(?tx_hash, "transaction submitted");

        let receipt = pending
            .await
            .map_err(|e| RemoteError::message(e.to_string()))?
            .ok_or_else(|| RemoteError::message(format!("transaction {tx_hash:#x} dropped")))?;

        if receipt.status == Some(U64::zero()) {
            return Err(RemoteError::message(format!("transaction {tx_hash:#x} reverted")));
        }
        Ok(receipt)
    }
}

#[async_trait]
impl<M> AssetRegistry for RwaContract<M>
where
    M: Middleware + 'static,
{
    async fn tokenize_asset(&self, name: &str, asset_type: &str, value: U256) -> Result<Tokenized, RemoteError> {
        let data = self.encode(
            FN_TOKENIZE,
            &[Token::String(name.to_string()), Token::String(asset_type.to_string()), Token::Uint(value)],
        )?;
        let receipt = self.send(data).await?;
        let asset_id = asset_id_from_receipt(&self.abi, self.address, &receipt);
        info!(tx = ?receipt.transaction_hash, ?asset_id, "asset tokenized");
        Ok(Tokenized { tx_hash: receipt.transaction_hash, asset_id })
    }

    async fn get_asset(&self, id: U256) -> Result<Asset, RemoteError> {
        let func = self.function(FN_GET)?;
        let data = self.encode(FN_GET, &[Token::Uint(id)])?;
        let tx: TypedTransaction = TransactionRequest::new().from(self.from).to(self.address).data(data).into();
        let out = self.client.call(&tx, None).await.map_err(rpc_error)?;
        let tokens = func
            .decode_output(&out)
            .map_err(|e| RemoteError::message(format!("decoding {FN_GET} output: {e}")))?;
        asset_from_tokens(tokens)
    }

    async fn transfer_asset(&self, id: U256, new_owner: Address) -> Result<H256, RemoteError> {
        let data = self.encode(FN_TRANSFER, &[Token::Uint(id), Token::Address(new_owner)])?;
        let receipt = self.send(data).await?;
        info!(tx = ?receipt.transaction_hash, %id, to = ?new_owner, "asset transferred");
        Ok(receipt.transaction_hash)
    }
}

/// Map a middleware error onto [`RemoteError`], keeping the revert reason if the
/// node sent one.
pub fn rpc_error<E: MiddlewareError>(err: E) -> RemoteError {
    match err.as_error_response() {
        Some(resp) => RemoteError::from_rpc(resp),
        None => RemoteError::message(err.to_string()),
    }
}

/// First argument of the first `AssetTokenized` log emitted by `contract`.
pub fn asset_id_from_receipt(abi: &Abi, contract: Address, receipt: &TransactionReceipt) -> Option<U256> {
    let event = abi.event(EV_TOKENIZED).ok()?;
    receipt
        .logs
        .iter()
        .filter(|log| log.address == contract)
        .find_map(|log| {
            let raw = RawLog { topics: log.topics.clone(), data: log.data.to_vec() };
            event.parse_log(raw).ok()
        })
        .and_then(|parsed| parsed.params.into_iter().next())
        .and_then(|param| param.value.into_uint())
}

/// `getAsset` may return six values or one tuple of six values.
pub fn asset_from_tokens(tokens: Vec<Token>) -> Result<Asset, RemoteError> {
    let fields = match <[Token; 1]>::try_from(tokens) {
        Ok([Token::Tuple(inner)]) => inner,
        Ok(single) => single.to_vec(),
        Err(tokens) => tokens,
    };
    let bad = || RemoteError::message(format!("unexpected {FN_GET} output shape"));

    let [id, name, asset_type, value, owner, timestamp]: [Token; 6] = fields.try_into().map_err(|_| bad())?;
    let timestamp = timestamp.into_uint().ok_or_else(bad)?;
    if timestamp > U256::from(u64::MAX) {
        return Err(bad());
    }

    let asset = Asset {
        id: id.into_uint().ok_or_else(bad)?,
        name: name.into_string().ok_or_else(bad)?,
        asset_type: asset_type.into_string().ok_or_else(bad)?,
        value: value.into_uint().ok_or_else(bad)?,
        owner: owner.into_address().ok_or_else(bad)?,
        timestamp: timestamp.as_u64(),
    };

    // Unset mapping slots come back zeroed instead of reverting.
    if asset.owner.is_zero() {
        return Err(RemoteError::reverted("Asset does not exist"));
    }
    Ok(asset)
}
