//! Known networks.
//!
//! Maps the `CHAIN` identifier to a fixed set of chain descriptors.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{AppError, Result};

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Goerli testnet chain ID.
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Polygon Mumbai testnet chain ID.
pub const POLYGON_MUMBAI_CHAIN_ID: u64 = 80001;

/// Static description of a supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    /// Identifier accepted in `CHAIN`.
    pub identifier: &'static str,
    /// Display name.
    pub name: &'static str,
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// Public RPC endpoint used when `PROVIDER` is not set.
    pub rpc_url: &'static str,
    /// Block explorer base URL.
    pub explorer_url: &'static str,
}

impl NetworkDescriptor {
    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, hash: impl fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url, hash)
    }
}

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Goerli,
    Sepolia,
    Mainnet,
    PolygonMumbai,
}

impl Network {
    /// All supported networks.
    pub const ALL: [Network; 4] =
        [Network::Goerli, Network::Sepolia, Network::Mainnet, Network::PolygonMumbai];

    /// Descriptor for this network.
    pub fn descriptor(&self) -> &'static NetworkDescriptor {
        match self {
            Network::Goerli => &GOERLI,
            Network::Sepolia => &SEPOLIA,
            Network::Mainnet => &MAINNET,
            Network::PolygonMumbai => &POLYGON_MUMBAI,
        }
    }
}

impl FromStr for Network {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Network::ALL
            .into_iter()
            .find(|network| network.descriptor().identifier == s)
            .ok_or_else(|| AppError::UnknownChain(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

const GOERLI: NetworkDescriptor = NetworkDescriptor {
    identifier: "goerli",
    name: "Goerli",
    chain_id: GOERLI_CHAIN_ID,
    rpc_url: "https://rpc.ankr.com/eth_goerli",
    explorer_url: "https://goerli.etherscan.io",
};

const SEPOLIA: NetworkDescriptor = NetworkDescriptor {
    identifier: "sepolia",
    name: "Sepolia",
    chain_id: SEPOLIA_CHAIN_ID,
    rpc_url: "https://rpc.sepolia.org",
    explorer_url: "https://sepolia.etherscan.io",
};

const MAINNET: NetworkDescriptor = NetworkDescriptor {
    identifier: "homestead",
    name: "Ethereum",
    chain_id: ETHEREUM_MAINNET_CHAIN_ID,
    rpc_url: "https://cloudflare-eth.com",
    explorer_url: "https://etherscan.io",
};

const POLYGON_MUMBAI: NetworkDescriptor = NetworkDescriptor {
    identifier: "maticmum",
    name: "Polygon Mumbai",
    chain_id: POLYGON_MUMBAI_CHAIN_ID,
    rpc_url: "https://rpc-mumbai.maticvigil.com",
    explorer_url: "https://mumbai.polygonscan.com",
};

/// Select the network named by a `CHAIN` identifier.
pub fn select_network(identifier: &str) -> Result<Network> {
    match identifier.parse::<Network>() {
        Ok(network) => {
            tracing::info!(network = %network, chain_id = network.descriptor().chain_id, "Network selected");
            Ok(network)
        }
        Err(err) => {
            tracing::error!(chain = %identifier, "Unknown chain identifier");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_known_networks() {
        assert_eq!(select_network("goerli").unwrap(), Network::Goerli);
        assert_eq!(select_network("sepolia").unwrap(), Network::Sepolia);
        assert_eq!(select_network("homestead").unwrap(), Network::Mainnet);
        assert_eq!(select_network("maticmum").unwrap(), Network::PolygonMumbai);
    }

    #[test]
    fn test_descriptor_matches_network() {
        let mumbai = select_network("maticmum").unwrap().descriptor();
        assert_eq!(mumbai.name, "Polygon Mumbai");
        assert_eq!(mumbai.chain_id, 80001);

        let mainnet = Network::Mainnet.descriptor();
        assert_eq!(mainnet.chain_id, ETHEREUM_MAINNET_CHAIN_ID);
        assert_eq!(mainnet.identifier, "homestead");
    }

    #[test]
    fn test_select_empty_identifier_fails() {
        match select_network("") {
            Err(AppError::UnknownChain(chain)) => assert!(chain.is_empty()),
            other => panic!("Expected UnknownChain, got {other:?}"),
        }
    }

    #[test]
    fn test_select_is_case_sensitive() {
        assert!(select_network("Sepolia").is_err());
        assert!(select_network("mainnet").is_err());
    }

    #[test]
    fn test_identifiers_and_chain_ids_are_unique() {
        for (i, a) in Network::ALL.iter().enumerate() {
            for b in &Network::ALL[i + 1..] {
                assert_ne!(a.descriptor().identifier, b.descriptor().identifier);
                assert_ne!(a.descriptor().chain_id, b.descriptor().chain_id);
            }
        }
    }

    #[test]
    fn test_tx_url() {
        let url = Network::PolygonMumbai.descriptor().tx_url("0xabc");
        assert_eq!(url, "https://mumbai.polygonscan.com/tx/0xabc");
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Network::Sepolia.to_string(), "Sepolia");
    }
}
