//! SQLite storage implementation for Spendwise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `spendwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for budgets, categories, transactions and settings
//! - Database-specific model types (with Diesel derives)
//!
//! Every write goes through the single writer actor in [`db::write_actor`];
//! reads borrow a connection from the pool.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budget;
pub mod category;
pub mod ledger;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from spendwise-core for convenience
pub use spendwise_core::errors::{DatabaseError, Error, Result};
