//! EVM Mint Playground Library
//!
//! Estimates, simulates and submits `mint` transactions on an example NFT
//! contract across a handful of EVM networks, and exposes the flows as MCP
//! tools.
//!
//! # Features
//!
//! - **Fee estimation**: gas and EIP-1559 fee estimates for the mint call
//! - **Safety margins**: integer-only 20% margins with a 2 gwei tip floor
//! - **Scenarios**: simulate-then-send flows with low, estimated, margin or
//!   legacy fees and pinned nonces
//! - **Queries**: balances, nonces and transaction lookups
//!
//! # Example
//!
//! ```rust,ignore
//! use evm_mint_playground::{Config, EvmMintServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let server = EvmMintServer::new(config)?;
//!     // Run server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod mcp;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use mcp::EvmMintServer;
