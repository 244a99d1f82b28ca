use thiserror::Error;

/// Failure of a single gateway round-trip. The gateway never retries on its
/// own; callers decide whether to re-issue the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("robot rejected command: {0}")]
    Rejected(String),
    #[error("gateway unavailable")]
    Unavailable,
}
