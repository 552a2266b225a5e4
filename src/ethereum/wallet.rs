//! Wallet management.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};

use crate::error::{AppError, Result};

/// Wallet manager for transaction signing.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Resolve the signing account.
    ///
    /// A non-empty private key wins; otherwise the first account
    /// (`m/44'/60'/0'/0/0`) of the mnemonic is used.
    pub fn resolve(private_key: Option<&str>, mnemonic: &str) -> Result<Self> {
        match private_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => Self::from_private_key(key),
            None if !mnemonic.trim().is_empty() => Self::from_mnemonic(mnemonic),
            None => Err(AppError::Wallet("Neither PRIVATE_KEY nor MNEMONIC is set".into())),
        }
    }

    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        // Remove 0x prefix if present
        let key = private_key.strip_prefix("0x").unwrap_or(private_key);

        let signer: PrivateKeySigner = key.parse()?;
        Ok(Self::from_signer(signer, "private key"))
    }

    /// Create a wallet manager from a BIP-39 English mnemonic.
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let signer = MnemonicBuilder::<English>::default().phrase(phrase.trim()).index(0)?.build()?;
        Ok(Self::from_signer(signer, "mnemonic"))
    }

    fn from_signer(signer: PrivateKeySigner, source: &'static str) -> Self {
        let address = signer.address();

        tracing::info!(address = %address, source, "Wallet initialized");

        Self { signer, address }
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Wrap the signer for use with a provider's wallet filler.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}
