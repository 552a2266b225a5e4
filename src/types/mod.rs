//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod fees;
pub mod scenario;
pub mod tx;
pub mod units;

pub use fees::*;
pub use scenario::*;
pub use tx::*;
pub use units::*;
