mod args;

use std::time::{Duration, Instant};

use alloy::primitives::U256;
use jeth_common::{
    ether::params::{get_transaction_params, TransactionParams},
    utils::{hex::ToLowerHex, strings::encode_hex_reduced},
};
use jeth_config::DEFAULT_RPC_TIMEOUT_SECS;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

pub use args::{ParamsArgs, ParamsArgsBuilder};

use crate::{error::Error, output::CommandOutput, utils::parse_address};

/// Transaction parameters of an account. Serialized with hex quantities, the way JSON-RPC
/// returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsResult {
    pub params: TransactionParams,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HexParams<'a> {
    rpc_url: &'a str,
    chain_id: String,
    from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_tip: Option<String>,
    gas_price: String,
    tx_count: String,
    tx_count_pending: String,
    balance: String,
}

impl Serialize for ParamsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let params = &self.params;
        HexParams {
            rpc_url: &params.rpc_url,
            chain_id: params.chain_id.to_lower_hex(),
            from: params.from.to_string(),
            gas_tip: params.gas_tip.map(|tip| encode_hex_reduced(U256::from(tip))),
            gas_price: encode_hex_reduced(U256::from(params.gas_price)),
            tx_count: params.tx_count.to_lower_hex(),
            tx_count_pending: params.tx_count_pending.to_lower_hex(),
            balance: params.balance.to_lower_hex(),
        }
        .serialize(serializer)
    }
}

impl CommandOutput for ParamsResult {
    fn plain(&self) -> String {
        let params = &self.params;
        let gas_tip = match params.gas_tip {
            Some(tip) => tip.to_string(),
            None => "unsupported".to_string(),
        };

        [
            format!("rpc url: {}", params.rpc_url),
            format!("chain id: {}", params.chain_id),
            format!("from: {}", params.from),
            format!("gas tip: {gas_tip}"),
            format!("gas price: {}", params.gas_price),
            format!("tx count: {}", params.tx_count),
            format!("tx count pending: {}", params.tx_count_pending),
            format!("balance: {}", params.balance),
        ]
        .join("\n")
    }
}

/// Looks up everything needed to sign a transaction from `args.from`. All lookups run
/// concurrently and fail together once `args.timeout` seconds have passed.
pub async fn params(args: ParamsArgs) -> Result<ParamsResult, Error> {
    let start_time = Instant::now();

    let from = parse_address(&args.from, "from")?;
    let timeout = match args.timeout {
        0 => DEFAULT_RPC_TIMEOUT_SECS,
        secs => secs,
    };

    info!("fetching transaction parameters for {}", from);
    let params = get_transaction_params(&args.rpc_url, from, Duration::from_secs(timeout)).await?;

    debug!("fetching transaction parameters took {:?}", start_time.elapsed());
    Ok(ParamsResult { params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn sample(gas_tip: Option<u128>) -> ParamsResult {
        ParamsResult {
            params: TransactionParams {
                rpc_url: "http://localhost:8545".to_string(),
                chain_id: 1,
                from: Address::ZERO,
                gas_tip,
                gas_price: 30_000_000_000,
                tx_count: 0,
                tx_count_pending: 2,
                balance: U256::from(255),
            },
        }
    }

    #[test]
    fn test_params_json_is_hex_encoded() {
        let json = sample(Some(1_000_000_000)).render(false).expect("failed to render");
        assert_eq!(
            json,
            r#"{"rpcUrl":"http://localhost:8545","chainId":"0x1","from":"0x0000000000000000000000000000000000000000","gasTip":"0x3b9aca00","gasPrice":"0x6fc23ac00","txCount":"0x0","txCountPending":"0x2","balance":"0xff"}"#
        );
    }

    #[test]
    fn test_params_json_omits_missing_gas_tip() {
        let json = sample(None).render(false).expect("failed to render");
        assert!(!json.contains("gasTip"));

        let plain = sample(None).plain();
        assert!(plain.contains("gas tip: unsupported"));
    }
}
