//! Error type for the register submission pipeline.

use thiserror::Error;

/// Every way a register submission can fail before or during the network round trip.
///
/// The outer guard in [`crate::onchain_instance::instance::RegisterProgramInstance::submit`]
/// collapses all of these into a single stringified failure.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("no viable bump seed found for program derived address")]
    NoViableBump,

    #[error("failed to serialize register instruction: {0}")]
    Serialization(#[from] std::io::Error),

    #[error("invalid recipient `{0}`: expected 32 bytes as hex or base58")]
    InvalidRecipient(String),

    #[error("Register message body malformed: expected at least 64 bytes, got {0}")]
    MalformedBody(usize),

    #[error("rpc error: {0}")]
    Rpc(String),
}

impl From<solana_client::client_error::ClientError> for RegisterError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        RegisterError::Rpc(err.to_string())
    }
}
