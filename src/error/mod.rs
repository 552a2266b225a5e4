//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use alloy::primitives::TxHash;
use alloy::transports::TransportError;
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `CHAIN` did not name a known network.
    #[error("Unknown chain: '{0}'")]
    UnknownChain(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Simulation failed.
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    /// The node does not know the transaction.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TxHash),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AppError {
    /// Build an RPC error carrying the most specific detail available.
    pub fn rpc(err: &TransportError) -> Self {
        AppError::Rpc(error_details(err))
    }

    /// Build a simulation error carrying the most specific detail available.
    pub fn simulation(err: &TransportError) -> Self {
        AppError::SimulationFailed(error_details(err))
    }
}

/// Reduce a transport error to the most useful message.
///
/// Prefers the node's JSON-RPC error payload (message plus revert data, if
/// any) and falls back to the transport's own description.
pub fn error_details(err: &TransportError) -> String {
    match err.as_error_resp() {
        Some(payload) => match payload.data.as_ref() {
            Some(data) => format!("{} ({})", payload.message, data.get()),
            None => payload.message.to_string(),
        },
        None => err.to_string(),
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        if err.as_error_resp().is_some() {
            AppError::rpc(&err)
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidAddress(_) | AppError::Parse(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            AppError::Config(_) | AppError::UnknownChain(_) => {
                McpError::invalid_request(err.to_string(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    fn node_error(message: &str) -> TransportError {
        let payload = format!(r#"{{"code":-32000,"message":"{message}"}}"#);
        TransportError::ErrorResp(serde_json::from_str(&payload).unwrap())
    }

    #[test]
    fn test_app_error_config_display() {
        let err = AppError::Config("Missing RPC URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: Missing RPC URL");
    }

    #[test]
    fn test_app_error_unknown_chain_display() {
        let err = AppError::UnknownChain("ropsten".to_string());
        assert_eq!(err.to_string(), "Unknown chain: 'ropsten'");
    }

    #[test]
    fn test_app_error_simulation_failed_display() {
        let err = AppError::SimulationFailed("Out of gas".to_string());
        assert_eq!(err.to_string(), "Simulation failed: Out of gas");
    }

    #[test]
    fn test_app_error_transaction_not_found_display() {
        let err = AppError::TransactionNotFound(TxHash::ZERO);
        assert!(err.to_string().starts_with("Transaction not found: 0x0000"));
    }

    #[test]
    fn test_error_details_prefers_node_message() {
        let err = node_error("max fee per gas less than block base fee");
        assert_eq!(error_details(&err), "max fee per gas less than block base fee");
    }

    #[test]
    fn test_error_details_falls_back_to_transport_text() {
        let err = TransportError::NullResp;
        assert_eq!(error_details(&err), err.to_string());
    }

    #[test]
    fn test_from_transport_error_classifies_node_errors_as_rpc() {
        let app_err: AppError = node_error("nonce too low").into();
        match app_err {
            AppError::Rpc(msg) => assert_eq!(msg, "nonce too low"),
            other => panic!("Expected Rpc error, got {other:?}"),
        }

        let app_err: AppError = TransportError::NullResp.into();
        assert!(matches!(app_err, AppError::Transport(_)));
    }

    #[test]
    fn test_simulation_constructor_keeps_details() {
        let err = AppError::simulation(&node_error("execution reverted"));
        assert_eq!(err.to_string(), "Simulation failed: execution reverted");
    }

    #[test]
    fn test_app_error_to_mcp_error_codes() {
        let mcp_err: McpError = AppError::InvalidAddress("bad".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_PARAMS);

        let mcp_err: McpError = AppError::Parse("bad".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_PARAMS);

        let mcp_err: McpError = AppError::UnknownChain(String::new()).into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_REQUEST);

        let mcp_err: McpError = AppError::Config("config error".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_REQUEST);

        let mcp_err: McpError = AppError::SimulationFailed("reverted".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_mcp_error_message_preserved() {
        let err = AppError::Rpc("Connection refused".to_string());
        let mcp_err: McpError = err.into();
        assert!(mcp_err.message.contains("Connection refused"));
        assert!(mcp_err.data.is_none());
    }
}
