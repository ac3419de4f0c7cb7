#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("{0}")]
    CommandError(#[from] jeth_core::Error),
}
