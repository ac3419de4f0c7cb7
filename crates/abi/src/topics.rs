//! Reconstruction of indexed event parameters from log topics.

use alloy::{hex, primitives::B256};
use tracing::trace;

use crate::{
    decode::decode_value,
    error::Error,
    types::AbiType,
    value::{TypedValue, Value},
};

/// Decode the indexed parameters of an event from its topics. `topics` must not include the
/// event id (topic 0).
///
/// Indexed dynamic values are stored as the keccak hash of their encoding, so they can't be
/// recovered. For `string`, `bytes`, slices and arrays the topic is returned verbatim, tagged
/// `bytes32`.
pub fn parse_topics(types: &[AbiType], topics: &[B256]) -> Result<Vec<TypedValue>, Error> {
    if types.len() != topics.len() {
        return Err(Error::ArityMismatch { expected: types.len(), got: topics.len() });
    }

    types.iter().zip(topics).map(|(ty, topic)| parse_topic(ty, topic)).collect()
}

fn parse_topic(ty: &AbiType, topic: &B256) -> Result<TypedValue, Error> {
    match ty {
        AbiType::Tuple(_) => Err(Error::UnsupportedIndexedTuple),
        AbiType::String | AbiType::Bytes | AbiType::Slice(_) | AbiType::Array(..) => {
            trace!("indexed {} is only present as its hash", ty);
            Ok(TypedValue::new(AbiType::Hash.to_string(), Value::Hash(*topic)))
        }
        AbiType::Function => {
            // the 24 byte address + selector is right aligned in the topic
            if topic[..8].iter().any(|b| *b != 0) {
                return Err(Error::InvalidFunctionEncoding(hex::encode(topic)));
            }
            Ok(TypedValue::new(ty.to_string(), Value::Bytes(topic[8..].to_vec())))
        }
        _ => decode_value(ty, topic.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, keccak256, U256};

    #[test]
    fn test_indexed_string_returns_hash() {
        let topic = keccak256("hello");
        let values = parse_topics(&[AbiType::String], &[topic]).expect("failed to parse topics");

        assert_eq!(values[0].ty, "bytes32");
        assert_eq!(values[0].value, Value::Hash(topic));
    }

    #[test]
    fn test_indexed_static_values() {
        let addr = address!("0x6b175474e89094c44da98b954eedeac495271d0f");
        let values = parse_topics(
            &[AbiType::Address, AbiType::Uint(256)],
            &[addr.into_word(), B256::from(U256::from(42))],
        )
        .expect("failed to parse topics");

        assert_eq!(values[0].value, Value::Address(addr));
        assert_eq!(values[1].value, Value::Uint(U256::from(42)));
    }

    #[test]
    fn test_indexed_tuple_is_rejected() {
        assert_eq!(
            parse_topics(&[AbiType::Tuple(vec![AbiType::Bool])], &[B256::ZERO]),
            Err(Error::UnsupportedIndexedTuple)
        );
    }

    #[test]
    fn test_indexed_function() {
        let mut topic = [0u8; 32];
        topic[8..].copy_from_slice(&[0x11; 24]);
        let values = parse_topics(&[AbiType::Function], &[B256::from(topic)])
            .expect("failed to parse topics");
        assert_eq!(values[0].value, Value::Bytes(vec![0x11; 24]));

        topic[0] = 1;
        assert!(matches!(
            parse_topics(&[AbiType::Function], &[B256::from(topic)]),
            Err(Error::InvalidFunctionEncoding(_))
        ));
    }

    #[test]
    fn test_topic_count_mismatch() {
        assert_eq!(
            parse_topics(&[AbiType::Bool, AbiType::Bool], &[B256::ZERO]),
            Err(Error::ArityMismatch { expected: 2, got: 1 })
        );
    }
}
