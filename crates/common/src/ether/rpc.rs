use crate::{
    error::Error,
    ether::provider::{BlockTag, MultiTransportProvider},
};
use alloy::{
    primitives::{Address, B256, U256},
    rpc::types::TransactionReceipt,
};
use tracing::debug;

pub(crate) async fn connect(rpc_url: &str) -> Result<MultiTransportProvider, Error> {
    MultiTransportProvider::connect(rpc_url)
        .await
        .map_err(|_| Error::RpcError(format!("failed to connect to provider '{}'", &rpc_url)))
}

/// Get the chainId of the provided RPC URL
///
/// ```no_run
/// use jeth_common::ether::rpc::chain_id;
///
/// // let chain_id = chain_id("https://eth.llamarpc.com").await?;
/// // assert_eq!(chain_id, 1);
/// ```
pub async fn chain_id(rpc_url: &str) -> Result<u64, Error> {
    connect(rpc_url)
        .await?
        .get_chain_id()
        .await
        .map_err(|e| Error::RpcError(format!("failed to get chain id: {e}")))
}

/// Get the latest block number of the provided RPC URL
pub async fn block_number(rpc_url: &str) -> Result<u64, Error> {
    connect(rpc_url)
        .await?
        .get_block_number()
        .await
        .map_err(|e| Error::RpcError(format!("failed to get block number: {e}")))
}

/// Get the current gas price, in wei
pub async fn gas_price(rpc_url: &str) -> Result<u128, Error> {
    connect(rpc_url)
        .await?
        .get_gas_price()
        .await
        .map_err(|e| Error::RpcError(format!("failed to get gas price: {e}")))
}

/// Get the suggested priority fee per gas, in wei
pub async fn max_priority_fee_per_gas(rpc_url: &str) -> Result<u128, Error> {
    connect(rpc_url)
        .await?
        .get_max_priority_fee_per_gas()
        .await
        .map_err(|e| Error::RpcError(format!("failed to get max priority fee per gas: {e}")))
}

/// Get the balance of `address` as of `tag`, in wei
pub async fn balance(rpc_url: &str, address: Address, tag: BlockTag) -> Result<U256, Error> {
    connect(rpc_url)
        .await?
        .get_balance(address, tag)
        .await
        .map_err(|e| Error::RpcError(format!("failed to get balance of {address}: {e}")))
}

/// Get the number of transactions sent from `address` as of `tag`
pub async fn transaction_count(
    rpc_url: &str,
    address: Address,
    tag: BlockTag,
) -> Result<u64, Error> {
    connect(rpc_url)
        .await?
        .get_transaction_count(address, tag)
        .await
        .map_err(|e| Error::RpcError(format!("failed to get transaction count of {address}: {e}")))
}

/// Get the receipt of a mined transaction
///
/// ```no_run
/// use jeth_common::ether::rpc::transaction_receipt;
///
/// // let receipt = transaction_receipt("https://eth.llamarpc.com", hash).await?;
/// // println!("{:?}", receipt.inner.logs());
/// ```
pub async fn transaction_receipt(rpc_url: &str, hash: B256) -> Result<TransactionReceipt, Error> {
    connect(rpc_url)
        .await?
        .get_transaction_receipt(hash)
        .await
        .map_err(|e| Error::RpcError(format!("failed to get receipt of {hash}: {e}")))?
        .ok_or_else(|| Error::RpcError(format!("no receipt found for transaction {hash}")))
}

/// Run an `eth_call` with already packed call data, returning the raw result bytes
///
/// ```no_run
/// use jeth_common::ether::rpc::call_method;
///
/// // let result = call_method("https://eth.llamarpc.com", None, to, None, data, BlockTag::Latest).await?;
/// ```
pub async fn call_method(
    rpc_url: &str,
    from: Option<Address>,
    to: Address,
    value: Option<U256>,
    data: Vec<u8>,
    tag: BlockTag,
) -> Result<Vec<u8>, Error> {
    debug!("calling {} at {} with {} bytes of call data", to, tag, data.len());

    let result = connect(rpc_url)
        .await?
        .call(from, to, value, data, tag)
        .await
        .map_err(|e| Error::RpcError(format!("eth_call failed: {e}")))?;

    Ok(result.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_rpc_url_is_rejected() {
        let result = chain_id("").await;
        assert!(matches!(result, Err(Error::RpcError(msg)) if msg.contains("failed to connect")));
    }

    #[tokio::test]
    async fn test_node_lookups_require_url() {
        assert!(matches!(block_number("").await, Err(Error::RpcError(_))));
        assert!(matches!(gas_price("").await, Err(Error::RpcError(_))));
        assert!(matches!(
            balance("", Address::ZERO, BlockTag::Latest).await,
            Err(Error::RpcError(_))
        ));
        assert!(matches!(transaction_receipt("", B256::ZERO).await, Err(Error::RpcError(_))));
    }

    #[tokio::test]
    async fn test_block_number() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let block_number = block_number(&rpc_url).await.expect("failed to get block number");
        assert!(block_number > 0);

        let count = transaction_count(&rpc_url, Address::ZERO, BlockTag::Pending)
            .await
            .expect("failed to get transaction count");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_chain_id() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let chain_id = chain_id(&rpc_url).await.expect("failed to get chain id");
        assert!(chain_id > 0);
    }
}
