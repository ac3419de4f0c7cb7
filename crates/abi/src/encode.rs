//! Head/tail encoding of typed values.

use alloy::primitives::{I256, U256};
use tracing::trace;

use crate::{
    error::Error,
    layout::{head_size, is_dynamic, WORD_SIZE},
    types::{AbiType, SUPPORTED_INT_WIDTHS},
    value::{TypedValue, Value},
};

/// Encode `values` against `types` using the standard head/tail layout.
///
/// Fails with [`Error::ArityMismatch`] if the number of values differs from the number of types.
/// On any error no output is produced.
///
/// ```
/// use alloy::primitives::U256;
/// use jeth_abi::{pack, AbiType, TypedValue, Value};
///
/// let packed = pack(
///     &[AbiType::Uint(256), AbiType::Bool],
///     &[
///         TypedValue::new("uint256", Value::Uint(U256::from(1))),
///         TypedValue::new("bool", Value::Bool(true)),
///     ],
/// )
/// .expect("failed to pack");
/// assert_eq!(packed.len(), 64);
/// ```
pub fn pack(types: &[AbiType], values: &[TypedValue]) -> Result<Vec<u8>, Error> {
    if types.len() != values.len() {
        return Err(Error::ArityMismatch { expected: types.len(), got: values.len() });
    }

    let items = types.iter().zip(values.iter().map(|v| &v.value)).collect::<Vec<_>>();
    let packed = encode_head_tail(&items)?;

    trace!("packed {} values into {} bytes", values.len(), packed.len());
    Ok(packed)
}

/// Encodes a block of values. Static values are written inline into the head, dynamic values
/// get an offset word in the head and their encoding appended to the tail. Offsets are relative
/// to the start of the block.
fn encode_head_tail(items: &[(&AbiType, &Value)]) -> Result<Vec<u8>, Error> {
    let head_len = head_size(items.iter().map(|(ty, _)| *ty));
    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (ty, value) in items {
        let encoded = encode_value(ty, value)?;

        if is_dynamic(ty) {
            let offset = head_len + tail.len();
            trace!("{} written to tail at offset {}", ty, offset);

            head.extend_from_slice(&usize_word(offset));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encodes a single value. For static types this is the inline head encoding, for dynamic types
/// it is the tail encoding.
pub(crate) fn encode_value(ty: &AbiType, value: &Value) -> Result<Vec<u8>, Error> {
    match (ty, value) {
        (AbiType::Bool, Value::Bool(b)) => Ok(usize_word(*b as usize).to_vec()),
        (AbiType::Uint(bits), Value::Uint(v)) => {
            check_uint_range(*v, *bits)?;
            Ok(v.to_be_bytes::<32>().to_vec())
        }
        (AbiType::Int(bits), Value::Int(v)) => {
            check_int_range(*v, *bits)?;
            Ok(v.into_raw().to_be_bytes::<32>().to_vec())
        }
        (AbiType::Address, Value::Address(address)) => {
            let mut word = [0u8; WORD_SIZE];
            word[12..].copy_from_slice(address.as_slice());
            Ok(word.to_vec())
        }
        (AbiType::Hash, Value::Hash(hash)) | (AbiType::FixedBytes(32), Value::Hash(hash)) => {
            Ok(hash.to_vec())
        }
        (AbiType::FixedBytes(len), Value::Bytes(bytes)) => {
            check_length(ty, *len, bytes.len())?;
            Ok(pad_right(bytes))
        }
        (AbiType::Function, Value::Bytes(bytes)) => {
            check_length(ty, 24, bytes.len())?;
            Ok(pad_right(bytes))
        }
        (AbiType::Bytes, Value::Bytes(bytes)) => Ok(encode_dynamic_bytes(bytes)),
        (AbiType::String, Value::String(s)) => Ok(encode_dynamic_bytes(s.as_bytes())),
        (AbiType::Slice(inner), Value::Sequence(elems)) => {
            let items = elems.iter().map(|e| (inner.as_ref(), &e.value)).collect::<Vec<_>>();

            let mut encoded = usize_word(elems.len()).to_vec();
            encoded.extend(encode_head_tail(&items)?);
            Ok(encoded)
        }
        (AbiType::Array(inner, len), Value::Sequence(elems)) => {
            if elems.len() != *len {
                return Err(Error::ArityMismatch { expected: *len, got: elems.len() });
            }
            let items = elems.iter().map(|e| (inner.as_ref(), &e.value)).collect::<Vec<_>>();
            encode_head_tail(&items)
        }
        (AbiType::Tuple(components), Value::Sequence(elems)) => {
            if elems.len() != components.len() {
                return Err(Error::ArityMismatch { expected: components.len(), got: elems.len() });
            }
            let items = components.iter().zip(elems.iter().map(|e| &e.value)).collect::<Vec<_>>();
            encode_head_tail(&items)
        }
        _ => Err(Error::ValueMismatch { ty: ty.to_string(), value: format!("{value:?}") }),
    }
}

/// Fails unless `value` fits into an unsigned integer of `bits` bits.
pub(crate) fn check_uint_range(value: U256, bits: usize) -> Result<(), Error> {
    if !SUPPORTED_INT_WIDTHS.contains(&bits) {
        return Err(Error::UnsupportedWidth(bits));
    }
    if value.bit_len() > bits {
        return Err(Error::OutOfRange { value: value.to_string(), ty: format!("uint{bits}") });
    }
    Ok(())
}

/// Fails unless `value` lies within `-2^(bits-1) ..= 2^(bits-1) - 1`.
pub(crate) fn check_int_range(value: I256, bits: usize) -> Result<(), Error> {
    if !SUPPORTED_INT_WIDTHS.contains(&bits) {
        return Err(Error::UnsupportedWidth(bits));
    }
    if bits == 256 {
        return Ok(());
    }

    let bound = U256::from(1) << (bits - 1);
    let fits = if value.is_negative() {
        value.unsigned_abs() <= bound
    } else {
        value.into_raw() < bound
    };

    if !fits {
        return Err(Error::OutOfRange { value: value.to_string(), ty: format!("int{bits}") });
    }
    Ok(())
}

fn check_length(ty: &AbiType, expected: usize, got: usize) -> Result<(), Error> {
    if expected != got {
        return Err(Error::InvalidLength { ty: ty.to_string(), expected, got });
    }
    Ok(())
}

/// A length word followed by the content, right padded to a word boundary.
fn encode_dynamic_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut encoded = usize_word(bytes.len()).to_vec();
    encoded.extend(pad_right(bytes));
    encoded
}

/// Right pads `bytes` with zeros to the next multiple of 32.
fn pad_right(bytes: &[u8]) -> Vec<u8> {
    let mut padded = bytes.to_vec();
    padded.resize(bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE, 0);
    padded
}

fn usize_word(n: usize) -> [u8; WORD_SIZE] {
    U256::from(n).to_be_bytes::<32>()
}
