//! MCP server module.
//!
//! Contains the MCP server implementation with tool handlers.

pub mod server;

pub use server::EvmMintServer;
pub use server::{AddressInput, GetTransactionInput, RunScenarioInput};
