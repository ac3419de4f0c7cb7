//! The jeth commands. Each module exposes its clap arguments, a builder for library use and an
//! entry function returning a printable result.
//!
//! ```
//! use jeth_core::{pack, PackArgsBuilder};
//!
//! let args = PackArgsBuilder::new()
//!     .method("transfer:address,uint256".to_string())
//!     .values(vec!["0x6b175474e89094c44da98b954eedeac495271d0f".to_string(), "1".to_string()])
//!     .build()
//!     .expect("failed to build args");
//!
//! let result = pack(args).expect("failed to pack");
//! assert_eq!(result.method_hashed, "a9059cbb");
//! ```

/// Error types for the jeth commands
pub mod error;

mod call;
mod event;
mod node;
mod output;
mod pack;
mod params;
mod receipt;
mod selector;
mod unpack;
mod utils;

// re-export the public interface
pub use call::{call, CallArgs, CallArgsBuilder, CallResult, Unit};
pub use error::Error;
pub use event::{event, EventArgs, EventArgsBuilder, EventResult};
pub use node::{
    balance, block_number, chain_id, gas_price, gas_tip, tx_count, AccountArgs,
    AccountArgsBuilder, ChainArgs, ChainArgsBuilder, FeeArgs, FeeArgsBuilder, NodeResult,
};
pub use jeth_common::ether::provider::BlockTag;
pub use output::CommandOutput;
pub use pack::{pack, PackArgs, PackArgsBuilder, PackResult};
pub use params::{params, ParamsArgs, ParamsArgsBuilder, ParamsResult};
pub use receipt::{receipt, ReceiptArgs, ReceiptArgsBuilder, ReceiptLog, ReceiptResult};
pub use selector::{selector, SelectorArgs, SelectorArgsBuilder, SelectorResult};
pub use unpack::{unpack, UnpackArgs, UnpackArgsBuilder, UnpackResult};
