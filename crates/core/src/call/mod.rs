mod args;

use std::time::Instant;

use alloy::primitives::U256;
use jeth_abi::{Method, TypedValue};
use jeth_common::{ether::rpc::call_method, utils::hex::ToLowerHex};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use args::{CallArgs, CallArgsBuilder, Unit};

use crate::{
    error::Error,
    output::CommandOutput,
    utils::{parse_address, split_method},
};

/// The raw call result as `0x` prefixed hex and, if output types were given, its decoded
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallResult {
    pub result: String,
    pub unpacked: Option<Vec<TypedValue>>,
}

impl CommandOutput for CallResult {
    fn plain(&self) -> String {
        let unpacked = match &self.unpacked {
            Some(values) => format!(
                "[{}]",
                values.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(", ")
            ),
            None => "none".to_string(),
        };
        format!("result: {}\nunpacked results: {}", self.result, unpacked)
    }
}

/// Packs the method call, runs it with `eth_call` against the block at `args.tag` and unpacks
/// the result with `args.output_types`.
///
/// A result that does not match the output types is not an error: a warning is logged and the
/// raw result is still returned.
pub async fn call(args: CallArgs) -> Result<CallResult, Error> {
    let start_time = Instant::now();

    let to = parse_address(&args.to, "to")?;
    let from = match args.from.trim() {
        "" => None,
        from => Some(parse_address(from, "from")?),
    };
    let value = parse_value(&args.value, args.unit)?;

    let (name, types) = split_method(&args.method)?;
    let method = Method::new(name, &[types], &[args.output_types.as_str()])?;
    let data = method.packed_call(&args.values)?;

    info!("calling {} on {} at {}", method.selector.signature, to, args.tag);
    let result = call_method(&args.rpc_url, from, to, value, data, args.tag).await?;

    let unpacked = if method.outputs.is_empty() {
        None
    } else {
        match method.unpack_result(&result) {
            Ok(values) => Some(values),
            Err(e) => {
                warn!("could not unpack the call result: {}", e);
                None
            }
        }
    };

    debug!("call took {:?}", start_time.elapsed());
    Ok(CallResult { result: result.to_lower_hex(), unpacked })
}

/// Parse an ether amount in `unit` into wei. An empty string means no value.
fn parse_value(value: &str, unit: Unit) -> Result<Option<U256>, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let amount = value
        .parse::<U256>()
        .map_err(|e| Error::ParseError(format!("invalid 256 bit integer '{value}': {e}")))?;
    let wei = amount
        .checked_mul(U256::from(unit.wei()))
        .ok_or_else(|| Error::ParseError(format!("{value} {unit} does not fit in 256 bits")))?;

    Ok(Some(wei))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("", Unit::Wei).expect("failed to parse"), None);
        assert_eq!(parse_value("0x10", Unit::Wei).expect("failed to parse"), Some(U256::from(16)));
        assert_eq!(
            parse_value("3", Unit::Gwei).expect("failed to parse"),
            Some(U256::from(3_000_000_000u64))
        );
        assert_eq!(
            parse_value("2", Unit::Eth).expect("failed to parse"),
            Some(U256::from(2_000_000_000_000_000_000u128))
        );
    }

    #[test]
    fn test_parse_value_rejects_bad_input() {
        assert!(matches!(parse_value("ten", Unit::Wei), Err(Error::ParseError(_))));
        assert!(matches!(parse_value("-1", Unit::Wei), Err(Error::ParseError(_))));

        let max = U256::MAX.to_string();
        assert!(matches!(parse_value(&max, Unit::Gwei), Err(Error::ParseError(_))));
        assert_eq!(parse_value(&max, Unit::Wei).expect("failed to parse"), Some(U256::MAX));
    }

    #[test]
    fn test_call_tag() {
        use clap::Parser;
        use jeth_common::ether::provider::BlockTag;

        let dai = "0x6b175474e89094c44da98b954eedeac495271d0f";
        let args = CallArgs::try_parse_from(["call", "--to", dai, "totalSupply:"])
            .expect("failed to parse args");
        assert_eq!(args.tag, BlockTag::Latest);

        let args = CallArgs::try_parse_from(["call", "--to", dai, "--tag", "pending", "totalSupply:"])
            .expect("failed to parse args");
        assert_eq!(args.tag, BlockTag::Pending);
        assert!(CallArgs::try_parse_from(["call", "--to", dai, "--tag", "1", "totalSupply:"]).is_err());
    }

    #[test]
    fn test_call_plain_output() {
        let result = CallResult { result: "0x".to_string(), unpacked: None };
        assert_eq!(result.plain(), "result: 0x\nunpacked results: none");
        assert_eq!(
            result.render(false).expect("failed to render"),
            r#"{"result":"0x","unpacked":null}"#
        );
    }
}
