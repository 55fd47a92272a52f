//! Spendwise Core - Domain entities, services, and traits.
//!
//! This crate contains the budgeting logic for Spendwise.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod budget;
pub mod category;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod settings;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
