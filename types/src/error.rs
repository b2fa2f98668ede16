/// Alias for a `Result` with the error type [`floodgate_types::Error`].
///
/// [`floodgate_types::Error`]: crate::Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Representation of the errors that can occur when handling core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Value is not a valid content hash.
    #[error("Invalid hash: {0}")]
    InvalidHash(String),
}
