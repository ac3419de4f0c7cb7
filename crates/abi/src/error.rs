//! Error types for the ABI codec

/// Errors that can occur while parsing types, coercing strings, packing or unpacking values.
///
/// Every codec error is deterministic: retrying the same call with the same input always
/// produces the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The type name could not be parsed.
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A numeric type uses a bit width outside of the supported set.
    #[error("unsupported bit width: {0}")]
    UnsupportedWidth(usize),

    /// The number of values does not match the number of types, or a tuple/array received the
    /// wrong number of elements.
    #[error("arity mismatch: expected {expected} values, got {got}")]
    ArityMismatch {
        /// The number of values the type requires.
        expected: usize,
        /// The number of values supplied.
        got: usize,
    },

    /// A numeric value does not fit into the declared bit width.
    #[error("value {value} out of range for {ty}")]
    OutOfRange {
        /// The offending value, rendered in base 10.
        value: String,
        /// The canonical type name.
        ty: String,
    },

    /// The input is not a `0x` prefixed hex string.
    #[error("invalid hex string: '{0}'")]
    InvalidHex(String),

    /// The input is not a boolean literal.
    #[error("invalid boolean: '{0}'")]
    InvalidBool(String),

    /// The input is not a base 10 integer.
    #[error("invalid integer: '{0}'")]
    InvalidInteger(String),

    /// A fixed-size value has the wrong number of bytes.
    #[error("invalid length for {ty}: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The canonical type name.
        ty: String,
        /// The number of bytes the type requires.
        expected: usize,
        /// The number of bytes supplied.
        got: usize,
    },

    /// An array or slice was given an empty list of elements.
    #[error("no array elements specified, expected: item,item,...")]
    EmptyArrayInput,

    /// The type is recognized but not supported by this operation.
    #[error("unimplemented type: {0}")]
    UnimplementedType(String),

    /// An encoded offset or length points outside of the buffer, or does not fit in 63 bits.
    #[error("offset {offset} out of bounds (len={len})")]
    OffsetOutOfBounds {
        /// The offending offset, rendered in base 10.
        offset: String,
        /// The length of the buffer the offset is relative to.
        len: usize,
    },

    /// The buffer ends before the value is complete.
    #[error("insufficient data: need {needed} bytes, have {available}")]
    InsufficientData {
        /// The number of bytes required.
        needed: usize,
        /// The number of bytes available.
        available: usize,
    },

    /// Tuples cannot be stored in a single log topic.
    #[error("tuple type in topic reconstruction")]
    UnsupportedIndexedTuple,

    /// A function word carries non-zero bytes outside its 24 byte address and selector.
    #[error("improperly encoded function type: 0x{0}")]
    InvalidFunctionEncoding(String),

    /// A bool word holds something other than 0 or 1.
    #[error("improperly encoded boolean value")]
    InvalidBoolEncoding,

    /// A string payload is not valid UTF-8.
    #[error("string payload is not valid utf-8")]
    InvalidUtf8,

    /// A value does not have the shape its type requires.
    #[error("value {value} does not match type {ty}")]
    ValueMismatch {
        /// The canonical type name.
        ty: String,
        /// A debug rendering of the value.
        value: String,
    },

    /// No log matched the event's topic hash.
    #[error("no matching logs")]
    NoMatchingLogs,
}
