//! Smart contract bindings.

pub mod wagmi;

pub use wagmi::{ContractFunction, IWagmiMintExample, WAGMI_MINT_EXAMPLE};
