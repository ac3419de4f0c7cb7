mod args;

use jeth_abi::{hashed_selector, parse_signature};
use jeth_common::utils::hex::ToLowerHex;
use serde::Serialize;

pub use args::{SelectorArgs, SelectorArgsBuilder};

use crate::{error::Error, output::CommandOutput};

/// A canonical signature with its 4 byte method id and 32 byte event topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorResult {
    pub signature: String,
    pub selector: String,
    pub topic: String,
}

impl CommandOutput for SelectorResult {
    fn plain(&self) -> String {
        format!("signature: {}\nselector: {}\ntopic: {}", self.signature, self.selector, self.topic)
    }
}

pub fn selector(args: SelectorArgs) -> Result<SelectorResult, Error> {
    let (name, types) = parse_signature(&args.signature)?;
    let hashed = hashed_selector(&name, &types);

    Ok(SelectorResult {
        selector: hashed.selector().to_lower_hex(),
        topic: hashed.topic().to_lower_hex(),
        signature: hashed.signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_normalizes_aliases() {
        let args = SelectorArgsBuilder::new()
            .signature("transfer(address, uint)".to_string())
            .build()
            .expect("failed to build args");

        let result = selector(args).expect("failed to hash signature");
        assert_eq!(result.signature, "transfer(address,uint256)");
        assert_eq!(result.selector, "0xa9059cbb");
        assert!(result.topic.starts_with("0xa9059cbb"));
        assert_eq!(result.topic.len(), 66);
    }
}
