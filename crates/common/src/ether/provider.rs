//! A thin wrapper around an alloy provider, exposing the node calls jeth needs.
use std::{fmt, str::FromStr};

use alloy::{
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{TransactionInput, TransactionReceipt, TransactionRequest},
};
use eyre::{eyre, Result};
use tracing::trace;

/// [`MultiTransportProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
#[derive(Clone, Debug)]
pub struct MultiTransportProvider {
    provider: RootProvider<Ethereum>,
}

/// Which block a call, nonce or balance lookup is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// The most recent mined block.
    Latest,
    /// The latest block plus the transactions in the node's pool.
    Pending,
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => write!(f, "latest"),
            BlockTag::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for BlockTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockTag::Latest),
            "pending" => Ok(BlockTag::Pending),
            _ => Err(format!("invalid block tag '{s}', expected 'latest' or 'pending'")),
        }
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        match tag {
            BlockTag::Latest => BlockId::latest(),
            BlockTag::Pending => BlockId::pending(),
        }
    }
}

// The transport is picked from the url scheme: http(s), ws(s) or an ipc path.
impl MultiTransportProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new().connect(rpc_url).await?.root().clone();
        Ok(Self { provider })
    }

    /// Run `eth_call` against the block at `tag` and return the raw result.
    pub async fn call(
        &self,
        from: Option<Address>,
        to: Address,
        value: Option<U256>,
        data: Vec<u8>,
        tag: BlockTag,
    ) -> Result<Bytes> {
        let mut tx = TransactionRequest::default().to(to).input(TransactionInput::new(data.into()));
        if let Some(from) = from {
            tx = tx.from(from);
        }
        if let Some(value) = value {
            tx = tx.value(value);
        }

        trace!("eth_call to {} at {}", to, tag);
        Ok(self.provider.call(tx).block(tag.into()).await?)
    }

    /// Get the chain id.
    pub async fn get_chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Get the current gas price, in wei.
    pub async fn get_gas_price(&self) -> Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    /// Get the suggested priority fee, in wei. Pre-London nodes don't implement this.
    pub async fn get_max_priority_fee_per_gas(&self) -> Result<u128> {
        Ok(self.provider.get_max_priority_fee_per_gas().await?)
    }

    /// Get the number of transactions sent from `address` as of `tag`.
    pub async fn get_transaction_count(&self, address: Address, tag: BlockTag) -> Result<u64> {
        Ok(self.provider.get_transaction_count(address).block_id(tag.into()).await?)
    }

    /// Get the balance of `address` as of `tag`, in wei.
    pub async fn get_balance(&self, address: Address, tag: BlockTag) -> Result<U256> {
        Ok(self.provider.get_balance(address).block_id(tag.into()).await?)
    }

    /// Get the receipt of a mined transaction. `None` if the node does not know the hash or the
    /// transaction is still pending.
    pub async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(hash).await?)
    }
}
