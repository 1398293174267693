//! SQLite storage implementation for countrycache.
//!
//! The only crate in the workspace that touches Diesel. It owns the
//! connection pool, pragma setup, embedded migrations, and the
//! repository implementation of the core persistence traits; everything
//! above it works with the database-agnostic types from
//! `countrycache-core`.

pub mod countries;
pub mod db;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, table_exists, DbConnection, DbPool,
    DbTransactionExecutor,
};

// Re-export the repository and storage errors
pub use countries::CountryRepository;
pub use errors::StorageError;

// Re-export from countrycache-core for convenience
pub use countrycache_core::errors::{DatabaseError, Error, Result};
