//! Claim workflow for the Sokushuu faucet client
//!
//! Everything between the user's form actions and the faucet backend:
//! - Environment-sourced client configuration
//! - The claim submitter (one POST per attempt, tagged response decode)
//! - The workflow controller owning selection, validation and settlement state

pub mod config;
pub mod error;
pub mod submitter;
pub mod workflow;

pub use config::FaucetClientConfig;
pub use error::{FaucetError, FaucetResult};
pub use submitter::{ClaimRequest, ClaimResult, ClaimSubmitter};
pub use workflow::{ClaimWorkflow, WorkflowState};
