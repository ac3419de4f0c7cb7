use alloy::primitives::Address;
use jeth_common::utils::strings::decode_hex;

use crate::error::Error;

/// Split a method or event given as `name:type1,type2` into its name and type list. The type
/// list may be empty, e.g. `totalSupply:`.
pub(crate) fn split_method(method: &str) -> Result<(&str, &str), Error> {
    let invalid = || {
        Error::ParseError(format!(
            "'{method}' must be given as <name>:<types>, e.g. transfer:address,uint256"
        ))
    };

    let (name, types) = method.split_once(':').ok_or_else(invalid)?;
    if name.trim().is_empty() || types.contains(':') {
        return Err(invalid());
    }

    Ok((name.trim(), types.trim()))
}

pub(crate) fn parse_address(address: &str, flag: &str) -> Result<Address, Error> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|e| Error::ParseError(format!("invalid address for --{flag} '{address}': {e}")))
}

pub(crate) fn parse_hex(data: &str, what: &str) -> Result<Vec<u8>, Error> {
    decode_hex(data).map_err(|e| Error::ParseError(format!("invalid {what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_method() {
        assert_eq!(
            split_method("transfer:address,uint256").expect("failed to split"),
            ("transfer", "address,uint256")
        );
        assert_eq!(split_method("totalSupply:").expect("failed to split"), ("totalSupply", ""));
        assert_eq!(
            split_method("f:(uint256,bool)[]").expect("failed to split"),
            ("f", "(uint256,bool)[]")
        );

        assert!(matches!(split_method("transfer"), Err(Error::ParseError(_))));
        assert!(matches!(split_method(":uint256"), Err(Error::ParseError(_))));
        assert!(matches!(split_method("a:b:c"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_parse_address() {
        let address = parse_address("0x6b175474e89094c44da98b954eedeac495271d0f", "to")
            .expect("failed to parse address");
        assert_eq!(address.to_string(), "0x6B175474E89094C44Da98b954EedeAC495271d0F");

        let err = parse_address("0x1234", "to").expect_err("short address should fail");
        assert!(err.to_string().contains("--to"));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x0102", "data").expect("failed to parse"), vec![1, 2]);
        assert_eq!(parse_hex("", "data").expect("failed to parse"), Vec::<u8>::new());
        assert!(parse_hex("0x012", "data").is_err());
    }
}
