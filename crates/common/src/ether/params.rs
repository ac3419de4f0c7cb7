//! Concurrent lookup of the parameters needed to build a transaction.

use std::{future::Future, time::Duration};

use alloy::primitives::{Address, U256};
use tracing::{debug, trace};

use crate::{
    error::Error,
    ether::{provider::BlockTag, rpc::connect},
};

/// Node state relevant to sending a transaction from `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    /// The node the parameters were read from.
    pub rpc_url: String,
    pub chain_id: u64,
    pub from: Address,
    /// `None` when the node does not implement `eth_maxPriorityFeePerGas`.
    pub gas_tip: Option<u128>,
    /// Legacy gas price, in wei.
    pub gas_price: u128,
    /// Nonce of the next transaction as of the latest block.
    pub tx_count: u64,
    /// Nonce of the next transaction counting the node's pending pool.
    pub tx_count_pending: u64,
    /// Balance at the latest block, in wei.
    pub balance: U256,
}

/// Fetch chain id, gas price, priority fee, both nonces and the balance of `from` concurrently.
///
/// All lookups run at once and the first failure is returned; the remaining requests are dropped
/// along with it. If the lookups do not finish within `timeout`, the in-flight requests are
/// cancelled and [`Error::Timeout`] is returned.
pub async fn get_transaction_params(
    rpc_url: &str,
    from: Address,
    timeout: Duration,
) -> Result<TransactionParams, Error> {
    let lookups = async {
        let provider = connect(rpc_url).await?;

        tokio::try_join!(
            async {
                provider
                    .get_chain_id()
                    .await
                    .map_err(|e| Error::RpcError(format!("failed to retrieve chainId: {e}")))
            },
            async {
                provider
                    .get_gas_price()
                    .await
                    .map_err(|e| Error::RpcError(format!("failed to retrieve gasPrice: {e}")))
            },
            async {
                match provider.get_max_priority_fee_per_gas().await {
                    Ok(tip) => Ok(Some(tip)),
                    Err(e) if is_unsupported_method(&e.to_string()) => {
                        debug!("node does not support eth_maxPriorityFeePerGas");
                        Ok(None)
                    }
                    Err(e) => Err(Error::RpcError(format!(
                        "failed to retrieve maxPriorityFeePerGas: {e}"
                    ))),
                }
            },
            async {
                provider.get_transaction_count(from, BlockTag::Latest).await.map_err(|e| {
                    Error::RpcError(format!("failed to retrieve transaction count: {e}"))
                })
            },
            async {
                provider.get_transaction_count(from, BlockTag::Pending).await.map_err(|e| {
                    Error::RpcError(format!("failed to retrieve pending transaction count: {e}"))
                })
            },
            async {
                provider
                    .get_balance(from, BlockTag::Latest)
                    .await
                    .map_err(|e| Error::RpcError(format!("failed to retrieve account balance: {e}")))
            },
        )
    };

    let (chain_id, gas_price, gas_tip, tx_count, tx_count_pending, balance) =
        with_timeout(timeout, lookups).await?;

    trace!("gathered transaction parameters for {} on chain {}", from, chain_id);
    Ok(TransactionParams {
        rpc_url: rpc_url.to_string(),
        chain_id,
        from,
        gas_tip,
        gas_price,
        tx_count,
        tx_count_pending,
        balance,
    })
}

/// Await `fut`, failing with [`Error::Timeout`] once `timeout` elapses. The future is dropped on
/// expiry, which cancels whatever it has in flight.
pub async fn with_timeout<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| Error::Timeout(format!("rpc lookups did not finish within {timeout:?}")))?
}

/// Nodes without EIP-1559 support reject `eth_maxPriorityFeePerGas` as an unknown method.
fn is_unsupported_method(message: &str) -> bool {
    message.contains("does not exist") || message.contains("not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unsupported_method() {
        assert!(is_unsupported_method(
            "server returned an error response: error code -32601: the method \
             eth_maxPriorityFeePerGas does not exist/is not available"
        ));
        assert!(is_unsupported_method("Method not found"));
        assert!(!is_unsupported_method("connection refused"));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Error>(())
        })
        .await;

        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[tokio::test]
    async fn test_first_error_wins() {
        let start = std::time::Instant::now();
        let result = with_timeout(Duration::from_secs(5), async {
            tokio::try_join!(
                async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Ok::<_, Error>(1)
                },
                async { Err::<u64, _>(Error::RpcError("failed to retrieve chainId".to_string())) },
            )
        })
        .await;

        assert!(matches!(result, Err(Error::RpcError(msg)) if msg.contains("chainId")));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_missing_rpc_url() {
        let result = get_transaction_params("", Address::ZERO, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(Error::RpcError(_))));
    }

    #[tokio::test]
    async fn test_get_transaction_params() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let params = get_transaction_params(&rpc_url, Address::ZERO, Duration::from_secs(30))
            .await
            .expect("failed to get transaction params");
        assert!(params.chain_id > 0);
        assert!(params.tx_count_pending >= params.tx_count);
    }
}
