/// Alias for a `Result` with the error type [`floodgate_engine::Error`].
///
/// [`floodgate_engine::Error`]: crate::Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Representation of all the errors that can occur inside the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wire transport error.
    #[error(transparent)]
    Rpc(#[from] floodgate_rpc::Error),

    /// The node reported a sequence mismatch but the expected value in its
    /// log could not be parsed. The recovery protocol's assumption about the
    /// rejection format no longer holds, so the run must abort.
    #[error("Failed to parse expected sequence from node log: {0}")]
    SequenceParsingFailed(String),

    /// Signing error.
    #[error(transparent)]
    Signing(#[from] k256::ecdsa::signature::Error),

    /// The mnemonic or derivation path does not yield a usable key.
    #[error("Invalid mnemonic or derivation path")]
    InvalidSigningKey,

    /// The configured address prefix is not valid bech32.
    #[error("Invalid bech32 address prefix: {0}")]
    InvalidAddressPrefix(String),

    /// The pool holds no asset other than the base one.
    #[error("Pool {0} has no counter asset to swap into")]
    NoCounterAsset(u64),
}
