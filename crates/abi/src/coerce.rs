//! Conversion of command line strings into typed values.
//!
//! Arrays, slices and tuples take a comma separated list. Static arrays and tuples nested inside
//! a composite are flattened into that list, so `(uint256[2],bool)` takes `1,2,true`. There is no
//! way to escape a literal comma, so a `string` element cannot contain one.

use alloy::{
    hex,
    primitives::{Address, Sign, B256, I256, U256},
};
use tracing::trace;

use crate::{
    encode::{check_int_range, check_uint_range, pack},
    error::Error,
    layout::{is_dynamic, static_word_size, virtual_slots},
    types::AbiType,
    value::{TypedValue, Value},
};

/// Convert `input` into a value of type `ty`.
///
/// ```
/// use alloy::primitives::U256;
/// use jeth_abi::{coerce, parse_type, Value};
///
/// let value = coerce(&parse_type("uint8").expect("bad type"), "255").expect("failed to coerce");
/// assert_eq!(value.value, Value::Uint(U256::from(255)));
/// assert!(coerce(&parse_type("uint8").expect("bad type"), "256").is_err());
/// ```
pub fn coerce(ty: &AbiType, input: &str) -> Result<TypedValue, Error> {
    let value = match ty {
        AbiType::Bool => {
            Value::Bool(input.parse::<bool>().map_err(|_| Error::InvalidBool(input.to_string()))?)
        }
        AbiType::Uint(bits) => {
            let (negative, magnitude) = parse_integer(ty, input)?;
            if negative && !magnitude.is_zero() {
                return Err(Error::OutOfRange { value: input.to_string(), ty: ty.to_string() });
            }
            check_uint_range(magnitude, *bits)?;
            Value::Uint(magnitude)
        }
        AbiType::Int(bits) => {
            let (negative, magnitude) = parse_integer(ty, input)?;
            let sign = if negative { Sign::Negative } else { Sign::Positive };
            let value = I256::checked_from_sign_and_abs(sign, magnitude).ok_or_else(|| {
                Error::OutOfRange { value: input.to_string(), ty: ty.to_string() }
            })?;
            check_int_range(value, *bits)?;
            Value::Int(value)
        }
        AbiType::Address => Value::Address(Address::from_slice(&parse_hex(ty, input, Some(20))?)),
        AbiType::Hash => Value::Hash(B256::from_slice(&parse_hex(ty, input, Some(32))?)),
        AbiType::FixedBytes(len) => Value::Bytes(parse_hex(ty, input, Some(*len))?),
        AbiType::Function => Value::Bytes(parse_hex(ty, input, Some(24))?),
        AbiType::Bytes => Value::Bytes(parse_hex(ty, input, None)?),
        AbiType::String => Value::String(input.to_string()),
        AbiType::Slice(inner) => {
            let parts = split_elements(input)?;
            let width = static_word_size(inner);
            if parts.len() % width != 0 {
                return Err(Error::ArityMismatch {
                    expected: parts.len().div_ceil(width) * width,
                    got: parts.len(),
                });
            }
            Value::Sequence(coerce_chunks(inner, &parts, width)?)
        }
        AbiType::Array(inner, len) => {
            let parts = split_elements(input)?;
            let width = static_word_size(inner);
            let expected = len.saturating_mul(width);
            if parts.len() != expected {
                return Err(Error::ArityMismatch { expected, got: parts.len() });
            }
            Value::Sequence(coerce_chunks(inner, &parts, width)?)
        }
        AbiType::Tuple(components) => {
            if is_dynamic(ty) {
                return Err(Error::UnimplementedType(ty.to_string()));
            }

            let parts = input.split(',').collect::<Vec<_>>();
            let expected = static_word_size(ty);
            if input.is_empty() || parts.len() != expected {
                let got = if input.is_empty() { 0 } else { parts.len() };
                return Err(Error::ArityMismatch { expected, got });
            }

            // every component after a static composite starts past the extra slots it consumed
            let mut virtual_args = 0;
            let mut values = Vec::with_capacity(components.len());
            for (index, component) in components.iter().enumerate() {
                let start = index + virtual_args;
                let width = static_word_size(component);
                values.push(coerce(component, &parts[start..start + width].join(","))?);
                virtual_args += virtual_slots(component);
            }
            Value::Sequence(values)
        }
    };

    trace!("coerced '{}' into {}", input, ty);
    Ok(TypedValue::new(ty.to_string(), value))
}

/// Coerce one string per type. Fails with [`Error::ArityMismatch`] if the counts differ.
pub fn values_from_strings<S: AsRef<str>>(
    types: &[AbiType],
    values: &[S],
) -> Result<Vec<TypedValue>, Error> {
    if types.len() != values.len() {
        return Err(Error::ArityMismatch { expected: types.len(), got: values.len() });
    }

    types.iter().zip(values).map(|(ty, value)| coerce(ty, value.as_ref())).collect()
}

/// Coerce `values` and pack them against `types`.
pub fn pack_values<S: AsRef<str>>(types: &[AbiType], values: &[S]) -> Result<Vec<u8>, Error> {
    pack(types, &values_from_strings(types, values)?)
}

/// Splits a comma separated element list. An empty input has no elements.
fn split_elements(input: &str) -> Result<Vec<&str>, Error> {
    if input.is_empty() {
        return Err(Error::EmptyArrayInput);
    }
    Ok(input.split(',').collect())
}

fn coerce_chunks(inner: &AbiType, parts: &[&str], width: usize) -> Result<Vec<TypedValue>, Error> {
    parts.chunks(width).map(|chunk| coerce(inner, &chunk.join(","))).collect()
}

/// Parses an optionally signed base 10 integer into its sign and magnitude.
fn parse_integer(ty: &AbiType, input: &str) -> Result<(bool, U256), Error> {
    let (negative, digits) = match input.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInteger(input.to_string()));
    }

    // all digits, so the only way this fails is a value wider than 256 bits
    let magnitude = U256::from_str_radix(digits, 10)
        .map_err(|_| Error::OutOfRange { value: input.to_string(), ty: ty.to_string() })?;

    Ok((negative, magnitude))
}

/// Decodes a `0x` prefixed hex string, checking its length for fixed-size types.
fn parse_hex(ty: &AbiType, input: &str, expected: Option<usize>) -> Result<Vec<u8>, Error> {
    let digits = input.strip_prefix("0x").ok_or_else(|| Error::InvalidHex(input.to_string()))?;
    let bytes = hex::decode(digits).map_err(|_| Error::InvalidHex(input.to_string()))?;

    match expected {
        Some(expected) if bytes.len() != expected => {
            Err(Error::InvalidLength { ty: ty.to_string(), expected, got: bytes.len() })
        }
        _ => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::WORD_SIZE, types::parse_type};
    use alloy::primitives::address;

    fn ty(name: &str) -> AbiType {
        parse_type(name).expect("failed to parse type")
    }

    fn uint(n: u64) -> TypedValue {
        TypedValue::new("uint256", Value::Uint(U256::from(n)))
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(coerce(&ty("bool"), "true").expect("bad bool").value, Value::Bool(true));
        assert_eq!(coerce(&ty("bool"), "false").expect("bad bool").value, Value::Bool(false));
        for input in ["1", "TRUE", "yes", ""] {
            assert!(matches!(coerce(&ty("bool"), input), Err(Error::InvalidBool(_))));
        }
    }

    #[test]
    fn test_coerce_integers() {
        assert_eq!(coerce(&ty("uint8"), "255").expect("bad int").value, Value::Uint(U256::from(255)));
        assert!(matches!(coerce(&ty("uint8"), "256"), Err(Error::OutOfRange { .. })));
        assert!(matches!(coerce(&ty("uint8"), "-1"), Err(Error::OutOfRange { .. })));

        let min = I256::try_from(-128i64).expect("fits");
        assert_eq!(coerce(&ty("int8"), "-128").expect("bad int").value, Value::Int(min));
        assert!(matches!(coerce(&ty("int8"), "-129"), Err(Error::OutOfRange { .. })));
        assert!(matches!(coerce(&ty("int8"), "128"), Err(Error::OutOfRange { .. })));

        for input in ["", "0x10", "1e3", "12a", "-"] {
            assert!(
                matches!(coerce(&ty("uint256"), input), Err(Error::InvalidInteger(_))),
                "expected '{input}' to be rejected"
            );
        }

        let too_wide = format!("1{}", "0".repeat(80));
        assert!(matches!(coerce(&ty("uint256"), &too_wide), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_coerce_hex_kinds() {
        let addr = coerce(&ty("address"), "0x6b175474e89094c44da98b954eedeac495271d0f")
            .expect("bad address");
        assert_eq!(addr.value, Value::Address(address!("0x6b175474e89094c44da98b954eedeac495271d0f")));

        assert!(matches!(
            coerce(&ty("address"), "6b175474e89094c44da98b954eedeac495271d0f"),
            Err(Error::InvalidHex(_))
        ));
        assert!(matches!(coerce(&ty("address"), "0xzz"), Err(Error::InvalidHex(_))));
        assert!(matches!(
            coerce(&ty("address"), "0x1234"),
            Err(Error::InvalidLength { expected: 20, got: 2, .. })
        ));
        assert!(matches!(
            coerce(&ty("hash"), "0x1234"),
            Err(Error::InvalidLength { expected: 32, got: 2, .. })
        ));

        assert_eq!(coerce(&ty("bytes"), "0x").expect("bad bytes").value, Value::Bytes(vec![]));
        assert_eq!(coerce(&ty("bytes2"), "0xbeef").expect("bad bytes").value, Value::Bytes(vec![0xbe, 0xef]));
    }

    #[test]
    fn test_coerce_string_is_verbatim() {
        assert_eq!(
            coerce(&ty("string"), " a,b ").expect("bad string").value,
            Value::String(" a,b ".to_string())
        );
    }

    #[test]
    fn test_coerce_arrays() {
        assert_eq!(
            coerce(&ty("uint256[]"), "1,2,3").expect("bad slice").value,
            Value::Sequence(vec![uint(1), uint(2), uint(3)])
        );
        assert_eq!(coerce(&ty("uint256[]"), ""), Err(Error::EmptyArrayInput));
        assert_eq!(
            coerce(&ty("uint256[3]"), "1,2"),
            Err(Error::ArityMismatch { expected: 3, got: 2 })
        );

        // nested static arrays are flattened
        let value = coerce(&ty("uint256[2][2]"), "1,2,3,4").expect("bad array");
        assert_eq!(
            value.value,
            Value::Sequence(vec![
                TypedValue::new("uint256[2]", Value::Sequence(vec![uint(1), uint(2)])),
                TypedValue::new("uint256[2]", Value::Sequence(vec![uint(3), uint(4)])),
            ])
        );
    }

    #[test]
    fn test_coerce_tuple_with_virtual_slots() {
        let value = coerce(&ty("(uint256[2],bool,(uint256,uint256))"), "1,2,true,3,4")
            .expect("bad tuple");
        assert_eq!(
            value.value,
            Value::Sequence(vec![
                TypedValue::new("uint256[2]", Value::Sequence(vec![uint(1), uint(2)])),
                TypedValue::new("bool", Value::Bool(true)),
                TypedValue::new("(uint256,uint256)", Value::Sequence(vec![uint(3), uint(4)])),
            ])
        );

        assert_eq!(
            coerce(&ty("(uint256,bool)"), "1"),
            Err(Error::ArityMismatch { expected: 2, got: 1 })
        );
        assert!(matches!(coerce(&ty("(uint256,string)"), "1,a"), Err(Error::UnimplementedType(_))));
    }

    #[test]
    fn test_values_from_strings() {
        let types = vec![ty("uint256"), ty("bool")];
        assert_eq!(
            values_from_strings(&types, &["1"]),
            Err(Error::ArityMismatch { expected: 2, got: 1 })
        );

        let packed = pack_values(&types, &["1", "true"]).expect("failed to pack");
        assert_eq!(packed.len(), 2 * WORD_SIZE);
        assert_eq!(packed[31], 1);
        assert_eq!(packed[63], 1);
    }

    #[test]
    fn test_pack_values_dynamic_string() {
        let packed = pack_values(&[ty("string")], &["hi"]).expect("failed to pack");
        assert_eq!(packed[31], 0x20);
        assert_eq!(packed[63], 0x02);
        assert_eq!(&packed[64..66], b"hi");
        assert_eq!(packed.len(), 3 * WORD_SIZE);
    }
}
