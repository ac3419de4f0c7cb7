//! Canonical signatures and their keccak hashes.

use alloy::primitives::{keccak256, Selector, B256};

use crate::{
    error::Error,
    types::{parse_type_list, AbiType},
};

/// A canonical signature such as `transfer(address,uint256)` and its keccak256 hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedSelector {
    /// The canonical signature, e.g. `transfer(address,uint256)`.
    pub signature: String,
    /// keccak256 of the signature.
    pub hash: B256,
}

impl HashedSelector {
    /// The first 4 bytes of the hash, prefixed to call data.
    pub fn selector(&self) -> Selector {
        Selector::from_slice(&self.hash[..4])
    }

    /// The full hash, used as topic 0 of event logs.
    pub fn topic(&self) -> B256 {
        self.hash
    }
}

/// Build the canonical signature of `name` over `types` and hash it.
///
/// ```
/// use jeth_abi::{hashed_selector, AbiType};
///
/// let hashed = hashed_selector("transfer", &[AbiType::Address, AbiType::Uint(256)]);
/// assert_eq!(hashed.signature, "transfer(address,uint256)");
/// assert_eq!(hashed.selector().to_string(), "0xa9059cbb");
/// ```
pub fn hashed_selector(name: &str, types: &[AbiType]) -> HashedSelector {
    let signature = format!(
        "{}({})",
        name,
        types.iter().map(|ty| ty.to_string()).collect::<Vec<_>>().join(",")
    );
    let hash = keccak256(signature.as_bytes());

    HashedSelector { signature, hash }
}

/// Split a signature like `transfer(address,uint256)` into its name and parameter types.
pub fn parse_signature(signature: &str) -> Result<(String, Vec<AbiType>), Error> {
    let signature = signature.trim();
    let open = signature
        .find('(')
        .ok_or_else(|| Error::InvalidType(format!("'{signature}' is missing a parameter list")))?;
    let params = signature[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| Error::InvalidType(format!("'{signature}' is missing a closing ')'")))?;

    let name = signature[..open].trim();
    if name.is_empty() {
        return Err(Error::InvalidType(format!("'{signature}' is missing a name")));
    }

    Ok((name.to_string(), parse_type_list(params)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_type;

    #[test]
    fn test_transfer_selector() {
        let types = vec![AbiType::Address, AbiType::Uint(256)];
        let first = hashed_selector("transfer", &types);
        let second = hashed_selector("transfer", &types);

        assert_eq!(first, second);
        assert_eq!(first.selector(), Selector::from([0xa9, 0x05, 0x9c, 0xbb]));
    }

    #[test]
    fn test_transfer_event_topic() {
        let hashed = hashed_selector("Transfer", &[AbiType::Address, AbiType::Address, AbiType::Uint(256)]);
        assert_eq!(
            hashed.topic().to_string(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_hash_type_is_written_as_bytes32() {
        let hashed = hashed_selector("f", &[AbiType::Hash, parse_type("(uint,bool)[]").expect("bad type")]);
        assert_eq!(hashed.signature, "f(bytes32,(uint256,bool)[])");
    }

    #[test]
    fn test_parse_signature() {
        let (name, types) = parse_signature("transfer(address,uint256)").expect("failed to parse");
        assert_eq!(name, "transfer");
        assert_eq!(types, vec![AbiType::Address, AbiType::Uint(256)]);

        let (name, types) = parse_signature("totalSupply()").expect("failed to parse");
        assert_eq!(name, "totalSupply");
        assert!(types.is_empty());

        assert!(parse_signature("transfer").is_err());
        assert!(parse_signature("(uint256)").is_err());
        assert!(parse_signature("f(uint256").is_err());
    }
}
