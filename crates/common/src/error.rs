//! Errors raised by the RPC helpers

/// Generic error type for jeth-common operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic error with a message
    #[error("Error: {0}")]
    Generic(String),
    /// Error when interacting with an RPC endpoint
    #[error("RPCError: {0}")]
    RpcError(String),
    /// A set of RPC lookups did not finish in time
    #[error("Timeout: {0}")]
    Timeout(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
