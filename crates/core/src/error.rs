/// Error type for the jeth commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error raised by the ABI codec
    #[error("ABI error: {0}")]
    AbiError(#[from] jeth_abi::Error),
    /// Error when interacting with an RPC endpoint
    #[error("{0}")]
    RpcError(#[from] jeth_common::Error),
    /// Error when serializing command output
    #[error("Json error: {0}")]
    SerdeError(#[from] serde_json::Error),
    /// Error when parsing command arguments
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
