use alloy::primitives::U256;
use eyre::{eyre, Result};
use std::fmt::Write;

/// Decodes a hex string into a vector of bytes. A leading `0x` is optional.
///
/// ```
/// use jeth_common::utils::strings::decode_hex;
///
/// let hex = "0x48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, b"Hello World".to_vec());
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    // normalize
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);

    if s.is_empty() {
        return Ok(vec![]);
    }
    if s.len() % 2 != 0 || !s.is_ascii() {
        return Err(eyre!("invalid hex string: {}", s));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Encodes a slice of bytes into a hex string, without a `0x` prefix
///
/// ```
/// use jeth_common::utils::strings::encode_hex;
///
/// let result = encode_hex(b"Hello World");
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::with_capacity(s.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Encodes a U256 as a `0x` prefixed hex quantity without leading zeros, the way JSON-RPC
/// nodes return them.
///
/// ```
/// use jeth_common::utils::strings::encode_hex_reduced;
/// use alloy::primitives::U256;
///
/// assert_eq!(encode_hex_reduced(U256::from(26)), "0x1a");
/// assert_eq!(encode_hex_reduced(U256::ZERO), "0x0");
/// ```
pub fn encode_hex_reduced(s: U256) -> String {
    format!("{s:#x}")
}

#[cfg(test)]
mod tests {
    use crate::utils::strings::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x").expect("should decode"), Vec::<u8>::new());
        assert_eq!(decode_hex(" 0xdeadbeef ").expect("should decode"), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_hex("00ff").expect("should decode"), vec![0x00, 0xff]);
    }

    #[test]
    fn test_decode_hex_invalid() {
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("zz").is_err());
        assert!(decode_hex("0xé1").is_err());
    }

    #[test]
    fn test_encode_hex_reduced() {
        assert_eq!(encode_hex_reduced(U256::MAX), format!("0x{}", "f".repeat(64)));
        assert_eq!(encode_hex_reduced(U256::from(1)), "0x1");
    }
}
