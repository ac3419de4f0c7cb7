use super::strings::{encode_hex, encode_hex_reduced};
use alloy::primitives::{FixedBytes, U256};

/// A convenience function which encodes a given EVM type into a `0x` prefixed, lowercase hex
/// string.
pub trait ToLowerHex {
    fn to_lower_hex(&self) -> String;
}

impl ToLowerHex for Vec<u8> {
    fn to_lower_hex(&self) -> String {
        format!("0x{}", encode_hex(self))
    }
}

/// Quantities drop their leading zeros.
impl ToLowerHex for U256 {
    fn to_lower_hex(&self) -> String {
        encode_hex_reduced(*self)
    }
}

impl ToLowerHex for u64 {
    fn to_lower_hex(&self) -> String {
        format!("{self:#x}")
    }
}

impl<const N: usize> ToLowerHex for FixedBytes<N> {
    fn to_lower_hex(&self) -> String {
        format!("0x{}", encode_hex(self.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Selector};

    #[test]
    fn test_to_lower_hex() {
        assert_eq!(U256::from(255).to_lower_hex(), "0xff");
        assert_eq!(7u64.to_lower_hex(), "0x7");
        assert_eq!(vec![0xab, 0x01].to_lower_hex(), "0xab01");
        assert_eq!(
            address!("0x6B175474E89094C44Da98b954EedeAC495271d0F").0.to_lower_hex(),
            "0x6b175474e89094c44da98b954eedeac495271d0f"
        );
        assert_eq!(Selector::from([0xa9, 0x05, 0x9c, 0xbb]).to_lower_hex(), "0xa9059cbb");
    }
}
