//! Typed values consumed by the encoder and produced by the decoder.

use std::fmt;

use alloy::{
    hex,
    primitives::{Address, B256, I256, U256},
};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::error::Error;

/// The payload of a [`TypedValue`].
///
/// `bytesN`, `bytes` and `function` values all use [`Value::Bytes`]; the type tag tells them
/// apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// Any `uintN`, zero extended to 256 bits.
    Uint(U256),
    /// Any `intN`, sign extended to 256 bits.
    Int(I256),
    /// `address`
    Address(Address),
    /// `hash`, or an indexed dynamic value that only survives as its topic.
    Hash(B256),
    /// `bytesN`, `bytes` and `function`.
    Bytes(Vec<u8>),
    /// `string`
    String(String),
    /// Elements of an array, slice or tuple, in order.
    Sequence(Vec<TypedValue>),
}

/// A value together with the canonical name of its type, e.g. `uint256`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValue {
    /// Canonical type name, as printed by [`AbiType`](crate::AbiType)'s `Display`.
    pub ty: String,
    pub value: Value,
}

impl TypedValue {
    /// Tag `value` with the type name `ty`.
    pub fn new(ty: impl Into<String>, value: Value) -> Self {
        Self { ty: ty.into(), value }
    }

    /// Returns the value as a [`U256`], if it is tagged `uint256`.
    ///
    /// ```
    /// use alloy::primitives::U256;
    /// use jeth_abi::{TypedValue, Value};
    ///
    /// let value = TypedValue::new("uint256", Value::Uint(U256::from(7)));
    /// assert_eq!(value.to_u256().expect("not a uint256"), U256::from(7));
    ///
    /// let value = TypedValue::new("uint8", Value::Uint(U256::from(7)));
    /// assert!(value.to_u256().is_err());
    /// ```
    pub fn to_u256(&self) -> Result<U256, Error> {
        match (&self.value, self.ty.as_str()) {
            (Value::Uint(value), "uint256") => Ok(*value),
            _ => Err(Error::ValueMismatch {
                ty: self.ty.clone(),
                value: format!("{:?}", self.value),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Uint(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Address(value) => write!(f, "{}", value.to_checksum(None)),
            Value::Hash(value) => write!(f, "{value}"),
            Value::Bytes(value) => write!(f, "0x{}", hex::encode(value)),
            Value::String(value) => write!(f, "{value}"),
            Value::Sequence(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value.value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.value)
    }
}

impl Serialize for Value {
    /// Integers are written as base 10 strings so no precision is lost in JSON consumers,
    /// byte-like values as `0x` prefixed hex.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Sequence(values) => values.serialize(serializer),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &self.ty)?;
        map.serialize_entry("value", &self.value)?;
        map.end()
    }
}
