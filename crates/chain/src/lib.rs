//! Chain registry for the Sokushuu faucet client
//!
//! Static metadata for the supported test networks:
//! - Numeric chain ids and account addresses as validated newtypes
//! - Per-chain display and transport metadata (name, icon, explorer, RPC)
//! - A registry resolving chain ids and listing the user-selectable networks

pub mod registry;
pub mod types;

pub use registry::{ChainMetadata, ChainRegistry, PrivateEndpoints};
pub use types::{Address, AddressParseError, ChainId};
