//! Error types for the faucet client

use thiserror::Error;

/// Faucet client errors
///
/// Submission outcomes are not errors; they settle as [`crate::ClaimResult`]
/// values and surface through workflow state. Only configuration problems
/// abort startup.
#[derive(Error, Debug)]
pub enum FaucetError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type FaucetResult<T> = Result<T, FaucetError>;
