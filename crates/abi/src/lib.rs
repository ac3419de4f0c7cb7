//! Contract ABI codec: type parsing, head/tail packing and unpacking, event topic decoding,
//! signature hashing and coercion of command line strings into typed values.

pub mod coerce;
pub mod contract;
pub mod decode;
pub mod encode;
pub mod error;
pub mod layout;
pub mod selector;
pub mod topics;
pub mod types;
pub mod value;

pub use coerce::{coerce, pack_values, values_from_strings};
pub use contract::{pack_constructor, Event, LogEntry, Method};
pub use decode::unpack;
pub use encode::pack;
pub use error::Error;
pub use layout::{is_dynamic, static_word_size, virtual_slots, WORD_SIZE};
pub use selector::{hashed_selector, parse_signature, HashedSelector};
pub use topics::parse_topics;
pub use types::{parse_type, parse_type_list, parse_type_with_components, AbiType};
pub use value::{TypedValue, Value};
