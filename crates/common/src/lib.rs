//! Common utilities and resources used across the jeth codebase.
//!
//! This crate provides hex helpers and the RPC transport that command modules use to reach
//! a node.

/// Error type shared by the RPC helpers.
pub mod error;

/// Utilities for interacting with Ethereum nodes.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
