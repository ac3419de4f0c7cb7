mod args;

use std::time::Instant;

use alloy::primitives::U256;
use jeth_common::{ether::rpc, utils::strings::encode_hex_reduced};
use serde::{ser::SerializeMap, Serialize, Serializer};
use tracing::{debug, info};

pub use args::{
    AccountArgs, AccountArgsBuilder, ChainArgs, ChainArgsBuilder, FeeArgs, FeeArgsBuilder,
};

use crate::{error::Error, output::CommandOutput, utils::parse_address};

const WEI_PER_GWEI: u64 = 1_000_000_000;

/// A single quantity read from a node. JSON output is `{"<name>": "<hex quantity>"}`, plain
/// output is the decimal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResult {
    /// JSON key of the value, e.g. `chainId`.
    pub name: &'static str,
    pub value: U256,
}

impl Serialize for NodeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, &encode_hex_reduced(self.value))?;
        map.end()
    }
}

impl CommandOutput for NodeResult {
    fn plain(&self) -> String {
        self.value.to_string()
    }
}

/// The chain id of the node behind `args.rpc_url`.
pub async fn chain_id(args: ChainArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();
    let chain_id = rpc::chain_id(&args.rpc_url).await?;

    debug!("fetching chain id took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "chainId", value: U256::from(chain_id) })
}

/// The latest block number of the node behind `args.rpc_url`.
pub async fn block_number(args: ChainArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();
    let block_number = rpc::block_number(&args.rpc_url).await?;

    debug!("fetching block number took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "blockNumber", value: U256::from(block_number) })
}

/// The node's legacy gas price, in wei or gwei.
pub async fn gas_price(args: FeeArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();
    let gas_price = rpc::gas_price(&args.rpc_url).await?;

    debug!("fetching gas price took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "gasPrice", value: in_unit(gas_price, args.gwei) })
}

/// The node's suggested priority fee per gas, in wei or gwei.
pub async fn gas_tip(args: FeeArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();
    let tip = rpc::max_priority_fee_per_gas(&args.rpc_url).await?;

    debug!("fetching gas tip took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "gasTip", value: in_unit(tip, args.gwei) })
}

/// The balance of `args.address` at `args.tag`, in wei.
pub async fn balance(args: AccountArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();

    let address = parse_address(&args.address, "address")?;
    info!("fetching balance of {} at {}", address, args.tag);
    let balance = rpc::balance(&args.rpc_url, address, args.tag).await?;

    debug!("fetching balance took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "balance", value: balance })
}

/// The number of transactions sent from `args.address` as of `args.tag`.
pub async fn tx_count(args: AccountArgs) -> Result<NodeResult, Error> {
    let start_time = Instant::now();

    let address = parse_address(&args.address, "address")?;
    info!("fetching transaction count of {} at {}", address, args.tag);
    let count = rpc::transaction_count(&args.rpc_url, address, args.tag).await?;

    debug!("fetching transaction count took {:?}", start_time.elapsed());
    Ok(NodeResult { name: "txCount", value: U256::from(count) })
}

fn in_unit(wei: u128, gwei: bool) -> U256 {
    let wei = U256::from(wei);
    if gwei {
        wei / U256::from(WEI_PER_GWEI)
    } else {
        wei
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use jeth_common::ether::provider::BlockTag;

    #[test]
    fn test_node_result_output() {
        let result = NodeResult { name: "chainId", value: U256::from(137) };
        assert_eq!(result.plain(), "137");
        assert_eq!(result.render(false).expect("failed to render"), r#"{"chainId":"0x89"}"#);
    }

    #[test]
    fn test_gwei_rounds_down() {
        assert_eq!(in_unit(30_999_999_999, true), U256::from(30));
        assert_eq!(in_unit(999, true), U256::ZERO);
        assert_eq!(in_unit(999, false), U256::from(999));
    }

    #[test]
    fn test_account_args_tag() {
        let args = AccountArgs::try_parse_from(["tx-count", "0x6b175474e89094c44da98b954eedeac495271d0f"])
            .expect("failed to parse args");
        assert_eq!(args.tag, BlockTag::Latest);

        let args = AccountArgs::try_parse_from([
            "tx-count",
            "0x6b175474e89094c44da98b954eedeac495271d0f",
            "--tag",
            "pending",
        ])
        .expect("failed to parse args");
        assert_eq!(args.tag, BlockTag::Pending);

        assert!(AccountArgs::try_parse_from(["tx-count", "0x00", "--tag", "safe"]).is_err());
    }

    #[tokio::test]
    async fn test_account_lookups_reject_bad_address() {
        let args = AccountArgsBuilder::new()
            .address("0x1234".to_string())
            .build()
            .expect("failed to build args");
        assert!(matches!(balance(args.clone()).await, Err(Error::ParseError(_))));
        assert!(matches!(tx_count(args).await, Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn test_lookups_without_endpoint() {
        let args = ChainArgsBuilder::new().build().expect("failed to build args");
        assert!(matches!(block_number(args).await, Err(Error::RpcError(_))));

        let args = FeeArgsBuilder::new().gwei(true).build().expect("failed to build args");
        assert!(matches!(gas_price(args).await, Err(Error::RpcError(_))));
    }
}
