//! Ethereum interaction module.
//!
//! Contains the network table, RPC clients, wallet management, and contract
//! bindings.

pub mod chains;
pub mod client;
pub mod contracts;
pub mod wallet;

pub use chains::{select_network, Network, NetworkDescriptor};
pub use client::{ChainReader, ChainWriter, EthereumClient, FeesPerGas, SigningClient};
pub use wallet::WalletManager;
