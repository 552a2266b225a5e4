//! Business logic services module.

pub mod fees;
pub mod transactions;

pub use fees::{apply_margin, FeeMarginPolicy};
pub use transactions::TransactionService;
