//! Method and event handles that pair parsed types with their cached selector.

use alloy::primitives::{Selector, B256};
use tracing::{debug, trace};

use crate::{
    coerce::values_from_strings,
    decode::unpack,
    encode::pack,
    error::Error,
    selector::{hashed_selector, HashedSelector},
    topics::parse_topics,
    types::{parse_type_list, AbiType},
    value::TypedValue,
};

/// A contract method with parsed input and output types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// The bare method name, e.g. `transfer`.
    pub name: String,
    /// Parameter types, in call order.
    pub inputs: Vec<AbiType>,
    /// Return types. Empty if the caller does not care about the result.
    pub outputs: Vec<AbiType>,
    pub selector: HashedSelector,
}

impl Method {
    /// Parse `inputs` and `outputs` and hash the method signature. Empty type names are skipped.
    ///
    /// ```
    /// use jeth_abi::Method;
    ///
    /// let method = Method::new("balanceOf", &["address"], &["uint256"]).expect("bad method");
    /// assert_eq!(method.selector.signature, "balanceOf(address)");
    /// assert_eq!(method.id().to_string(), "0x70a08231");
    /// ```
    pub fn new<S: AsRef<str>>(name: &str, inputs: &[S], outputs: &[S]) -> Result<Self, Error> {
        let inputs = parse_types(inputs)?;
        let outputs = parse_types(outputs)?;
        let selector = hashed_selector(name, &inputs);

        Ok(Self { name: name.to_string(), inputs, outputs, selector })
    }

    /// The 4 byte method id.
    pub fn id(&self) -> Selector {
        self.selector.selector()
    }

    /// Coerce `values` and return `selector ++ pack(values)`.
    pub fn packed_call<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<u8>, Error> {
        self.encode_call(&values_from_strings(&self.inputs, values)?)
    }

    /// Return `selector ++ pack(values)` for already typed values.
    pub fn encode_call(&self, values: &[TypedValue]) -> Result<Vec<u8>, Error> {
        let mut data = self.id().to_vec();
        data.extend(pack(&self.inputs, values)?);

        debug!("encoded call to {} ({} bytes)", self.selector.signature, data.len());
        Ok(data)
    }

    /// Decode return data using the output types.
    pub fn unpack_result(&self, result: &[u8]) -> Result<Vec<TypedValue>, Error> {
        unpack(&self.outputs, result)
    }
}

/// A raw log as returned by a node: topic 0 is the event id for non-anonymous events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    pub topics: Vec<B256>,
    /// The non-indexed parameters, head/tail encoded.
    pub data: Vec<u8>,
}

/// An event with its indexed (topic) and non-indexed (data) parameter types.
///
/// The event hash covers the indexed types followed by the data types, so the declaration order
/// of a mixed event must already list its indexed parameters first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The bare event name, e.g. `Transfer`.
    pub name: String,
    /// Types carried in topics 1.., in order.
    pub indexed: Vec<AbiType>,
    /// Types head/tail encoded in the log data.
    pub data: Vec<AbiType>,
    /// Signature over the indexed types followed by the data types, and its hash.
    pub hash: HashedSelector,
}

impl Event {
    /// Parse the indexed and data types and hash the event signature. Empty type names are
    /// skipped.
    pub fn new<S: AsRef<str>>(name: &str, indexed: &[S], data: &[S]) -> Result<Self, Error> {
        let indexed = parse_types(indexed)?;
        let data = parse_types(data)?;

        let all = indexed.iter().chain(data.iter()).cloned().collect::<Vec<_>>();
        let hash = hashed_selector(name, &all);

        Ok(Self { name: name.to_string(), indexed, data, hash })
    }

    /// The 32 byte event id, i.e. topic 0.
    pub fn id(&self) -> B256 {
        self.hash.topic()
    }

    /// Decode a single log. Returns `Ok(None)` if its topic 0 is not this event's id.
    ///
    /// The result holds the indexed values followed by the data values.
    pub fn decode_log(&self, topics: &[B256], data: &[u8]) -> Result<Option<Vec<TypedValue>>, Error> {
        match topics.first() {
            Some(topic) if *topic == self.id() => {}
            _ => {
                trace!("log does not match {}", self.hash.signature);
                return Ok(None);
            }
        }

        let mut values = parse_topics(&self.indexed, &topics[1..])?;
        values.extend(unpack(&self.data, data)?);
        Ok(Some(values))
    }

    /// Decode every log matching this event. Fails with [`Error::NoMatchingLogs`] if none match.
    pub fn decode_logs(&self, logs: &[LogEntry]) -> Result<Vec<Vec<TypedValue>>, Error> {
        let mut decoded = Vec::new();
        for log in logs {
            if let Some(values) = self.decode_log(&log.topics, &log.data)? {
                decoded.push(values);
            }
        }

        if decoded.is_empty() {
            return Err(Error::NoMatchingLogs);
        }

        debug!("decoded {} of {} logs as {}", decoded.len(), logs.len(), self.hash.signature);
        Ok(decoded)
    }
}

/// Append the packed constructor arguments to contract creation bytecode.
pub fn pack_constructor<S: AsRef<str>>(
    bytecode: &[u8],
    types: &[AbiType],
    values: &[S],
) -> Result<Vec<u8>, Error> {
    let mut data = bytecode.to_vec();
    data.extend(pack(types, &values_from_strings(types, values)?)?);
    Ok(data)
}

fn parse_types<S: AsRef<str>>(names: &[S]) -> Result<Vec<AbiType>, Error> {
    let mut types = Vec::with_capacity(names.len());
    for name in names {
        types.extend(parse_type_list(name.as_ref())?);
    }
    Ok(types)
}
