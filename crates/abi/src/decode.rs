//! Decoding of head/tail encoded data back into typed values.

use alloy::{
    hex,
    primitives::{Address, B256, I256, U256},
};
use tracing::trace;

use crate::{
    error::Error,
    layout::{head_size, is_dynamic, WORD_SIZE},
    types::{AbiType, SUPPORTED_INT_WIDTHS},
    value::{TypedValue, Value},
};

/// Decode `data` against `types`.
///
/// Offsets to dynamic values are resolved relative to the start of the block that contains them,
/// so nested dynamic tuples and arrays are handled the same way as the top level.
///
/// ```
/// use jeth_abi::{unpack, AbiType, Value};
///
/// let mut data = vec![0u8; 32];
/// data[31] = 1;
/// let values = unpack(&[AbiType::Bool], &data).expect("failed to unpack");
/// assert_eq!(values[0].value, Value::Bool(true));
/// ```
pub fn unpack(types: &[AbiType], data: &[u8]) -> Result<Vec<TypedValue>, Error> {
    let values = decode_block(types.iter(), data)?;
    trace!("unpacked {} values from {} bytes", values.len(), data.len());
    Ok(values)
}

/// Decodes consecutive head entries from `block`, following offsets for dynamic types.
fn decode_block<'a>(
    types: impl IntoIterator<Item = &'a AbiType>,
    block: &[u8],
) -> Result<Vec<TypedValue>, Error> {
    let mut values = Vec::new();
    let mut cursor = 0;

    for ty in types {
        let value = if is_dynamic(ty) {
            // (1) dynamic values are referenced through an offset word in the head
            let offset = read_offset(block, cursor)?;
            trace!("{} at head {} points to offset {}", ty, cursor, offset);
            decode_value(ty, &block[offset..])?
        } else {
            // (2) static values are inlined, spanning their static word size
            let slot = slice(block, cursor, head_size([ty]))?;
            decode_value(ty, slot)?
        };

        values.push(value);
        cursor = cursor.saturating_add(head_size([ty]));
    }

    Ok(values)
}

/// Decodes a single value from `data`, which starts at the value's own encoding. For static types
/// that is the inline head, for dynamic types the tail.
pub(crate) fn decode_value(ty: &AbiType, data: &[u8]) -> Result<TypedValue, Error> {
    let value = match ty {
        AbiType::Bool => {
            let word = read_word(data, 0)?;
            match (word[..31].iter().all(|b| *b == 0), word[31]) {
                (true, 0) => Value::Bool(false),
                (true, 1) => Value::Bool(true),
                _ => return Err(Error::InvalidBoolEncoding),
            }
        }
        AbiType::Uint(bits) => {
            let raw = U256::from_be_bytes(*read_word(data, 0)?);
            Value::Uint(raw & width_mask(*bits)?)
        }
        AbiType::Int(bits) => {
            let raw = U256::from_be_bytes(*read_word(data, 0)?);
            let mask = width_mask(*bits)?;
            let truncated = raw & mask;

            // sign extend from the declared width
            let extended = if *bits < 256 && truncated.bit(*bits - 1) {
                truncated | !mask
            } else {
                truncated
            };
            Value::Int(I256::from_raw(extended))
        }
        AbiType::Address => Value::Address(Address::from_slice(&read_word(data, 0)?[12..])),
        AbiType::Hash => Value::Hash(B256::from(*read_word(data, 0)?)),
        AbiType::FixedBytes(len) => Value::Bytes(read_word(data, 0)?[..*len].to_vec()),
        AbiType::Function => {
            // the 24 byte address + selector is left aligned in the word
            let word = read_word(data, 0)?;
            if word[24..].iter().any(|b| *b != 0) {
                return Err(Error::InvalidFunctionEncoding(hex::encode(word)));
            }
            Value::Bytes(word[..24].to_vec())
        }
        AbiType::Bytes => Value::Bytes(read_dynamic_bytes(data)?.to_vec()),
        AbiType::String => Value::String(
            String::from_utf8(read_dynamic_bytes(data)?.to_vec()).map_err(|_| Error::InvalidUtf8)?,
        ),
        AbiType::Slice(inner) => {
            let len = read_length(data, 0)?;
            let elements = &data[WORD_SIZE..];

            // every element occupies at least its head, so a length that cannot fit is rejected
            // before anything is allocated
            let needed = len.checked_mul(head_size([inner.as_ref()])).ok_or_else(|| {
                Error::OffsetOutOfBounds { offset: len.to_string(), len: data.len() }
            })?;
            if needed > elements.len() {
                return Err(Error::InsufficientData { needed, available: elements.len() });
            }

            Value::Sequence(decode_block(std::iter::repeat_n(inner.as_ref(), len), elements)?)
        }
        AbiType::Array(inner, len) => {
            Value::Sequence(decode_block(std::iter::repeat_n(inner.as_ref(), *len), data)?)
        }
        AbiType::Tuple(components) => Value::Sequence(decode_block(components.iter(), data)?),
    };

    Ok(TypedValue::new(ty.to_string(), value))
}

/// Mask selecting the low `bits` bits of a word.
fn width_mask(bits: usize) -> Result<U256, Error> {
    if !SUPPORTED_INT_WIDTHS.contains(&bits) {
        return Err(Error::UnsupportedWidth(bits));
    }
    Ok(if bits == 256 { U256::MAX } else { (U256::from(1) << bits) - U256::from(1) })
}

/// Reads the length-prefixed payload of a `bytes` or `string` value.
fn read_dynamic_bytes(data: &[u8]) -> Result<&[u8], Error> {
    let len = read_length(data, 0)?;
    slice(data, WORD_SIZE, len)
}

/// Reads an offset word and checks that it points inside `block`.
fn read_offset(block: &[u8], pos: usize) -> Result<usize, Error> {
    let offset = read_usize(block, pos)?;
    if offset > block.len() {
        return Err(Error::OffsetOutOfBounds { offset: offset.to_string(), len: block.len() });
    }
    Ok(offset)
}

/// Reads a length word. The caller checks the length against the remaining data.
fn read_length(data: &[u8], pos: usize) -> Result<usize, Error> {
    read_usize(data, pos)
}

/// Reads a word that must fit in 63 bits.
fn read_usize(data: &[u8], pos: usize) -> Result<usize, Error> {
    let word = U256::from_be_bytes(*read_word(data, pos)?);
    if word.bit_len() > 63 {
        return Err(Error::OffsetOutOfBounds { offset: word.to_string(), len: data.len() });
    }

    usize::try_from(word.as_limbs()[0])
        .map_err(|_| Error::OffsetOutOfBounds { offset: word.to_string(), len: data.len() })
}

fn read_word(data: &[u8], pos: usize) -> Result<&[u8; WORD_SIZE], Error> {
    slice(data, pos, WORD_SIZE)?
        .try_into()
        .map_err(|_| Error::InsufficientData { needed: pos + WORD_SIZE, available: data.len() })
}

fn slice(data: &[u8], pos: usize, len: usize) -> Result<&[u8], Error> {
    let end = pos
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or(Error::InsufficientData { needed: pos.saturating_add(len), available: data.len() })?;
    Ok(&data[pos..end])
}
