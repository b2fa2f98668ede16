/// Alias for a `Result` with the error type [`floodgate_rpc::Error`].
///
/// [`floodgate_rpc::Error`]: crate::Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Representation of all the errors that can occur when talking to the node.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error coming from the JSON-RPC transport or server.
    #[error(transparent)]
    JsonRpc(#[from] jsonrpsee::core::ClientError),

    /// Error coming from the REST (LCD) transport or server.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Connection string uses a protocol we cannot speak.
    #[error("Protocol not supported: {0}")]
    ProtocolNotSupported(String),
}
