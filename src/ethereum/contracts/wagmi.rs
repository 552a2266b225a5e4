//! Example mint contract bindings.

use alloy::{
    primitives::{address, Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};

/// Deployed example mint contract (Polygon Mumbai).
pub const WAGMI_MINT_EXAMPLE: Address = address!("9242fda4882285a6dd412ba556d8ecdf9f994d78");

// Subset of the wagmi mint example ERC721 interface
sol! {
    interface IWagmiMintExample {
        function mint() external;
        function approve(address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function setApprovalForAll(address operator, bool approved) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
    }
}

/// A state-changing call on the example contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFunction {
    Mint,
    Approve { to: Address, token_id: U256 },
    SafeTransferFrom { from: Address, to: Address, token_id: U256 },
    SetApprovalForAll { operator: Address, approved: bool },
    TransferFrom { from: Address, to: Address, token_id: U256 },
}

impl ContractFunction {
    /// Function name as it appears in the ABI.
    pub fn name(&self) -> &'static str {
        match self {
            ContractFunction::Mint => "mint",
            ContractFunction::Approve { .. } => "approve",
            ContractFunction::SafeTransferFrom { .. } => "safeTransferFrom",
            ContractFunction::SetApprovalForAll { .. } => "setApprovalForAll",
            ContractFunction::TransferFrom { .. } => "transferFrom",
        }
    }

    /// Canonical Solidity signature, e.g. `mint()`.
    pub fn signature(&self) -> &'static str {
        match self {
            ContractFunction::Mint => IWagmiMintExample::mintCall::SIGNATURE,
            ContractFunction::Approve { .. } => IWagmiMintExample::approveCall::SIGNATURE,
            ContractFunction::SafeTransferFrom { .. } => {
                IWagmiMintExample::safeTransferFromCall::SIGNATURE
            }
            ContractFunction::SetApprovalForAll { .. } => {
                IWagmiMintExample::setApprovalForAllCall::SIGNATURE
            }
            ContractFunction::TransferFrom { .. } => IWagmiMintExample::transferFromCall::SIGNATURE,
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> Bytes {
        let encoded = match *self {
            ContractFunction::Mint => IWagmiMintExample::mintCall {}.abi_encode(),
            ContractFunction::Approve { to, token_id } => {
                IWagmiMintExample::approveCall { to, tokenId: token_id }.abi_encode()
            }
            ContractFunction::SafeTransferFrom { from, to, token_id } => {
                IWagmiMintExample::safeTransferFromCall { from, to, tokenId: token_id }.abi_encode()
            }
            ContractFunction::SetApprovalForAll { operator, approved } => {
                IWagmiMintExample::setApprovalForAllCall { operator, approved }.abi_encode()
            }
            ContractFunction::TransferFrom { from, to, token_id } => {
                IWagmiMintExample::transferFromCall { from, to, tokenId: token_id }.abi_encode()
            }
        };
        encoded.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_calldata_is_selector_only() {
        let data = ContractFunction::Mint.calldata();
        // keccak256("mint()")[..4]
        assert_eq!(data.as_ref(), &[0x12, 0x49, 0xc5, 0x8b]);
    }

    #[test]
    fn test_function_names_and_signatures() {
        assert_eq!(ContractFunction::Mint.name(), "mint");
        assert_eq!(ContractFunction::Mint.signature(), "mint()");

        let approve = ContractFunction::Approve { to: Address::ZERO, token_id: U256::from(7) };
        assert_eq!(approve.name(), "approve");
        assert_eq!(approve.signature(), "approve(address,uint256)");
    }

    #[test]
    fn test_calldata_encodes_arguments() {
        let call = ContractFunction::SetApprovalForAll { operator: WAGMI_MINT_EXAMPLE, approved: true };
        let data = call.calldata();
        // selector + two 32-byte words
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(data[4 + 63], 1);
    }

    #[test]
    fn test_signature_prefix_matches_name() {
        let calls = [
            ContractFunction::Mint,
            ContractFunction::TransferFrom {
                from: Address::ZERO,
                to: Address::ZERO,
                token_id: U256::ZERO,
            },
            ContractFunction::SafeTransferFrom {
                from: Address::ZERO,
                to: Address::ZERO,
                token_id: U256::ZERO,
            },
        ];
        for call in calls {
            assert!(call.signature().starts_with(call.name()));
        }
    }
}
