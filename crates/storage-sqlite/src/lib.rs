//! SQLite storage implementation for lotfolio.
//!
//! This crate provides all database-related functionality using Diesel
//! with SQLite. It implements the repository traits defined in
//! `lotfolio-core` and contains:
//! - Connection pooling and embedded migrations
//! - A single-writer actor serializing all mutations
//! - Repository implementations for lots and portfolio snapshots
//!
//! This is the only crate in the workspace where Diesel dependencies
//! exist; everything above it is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod lots;
pub mod snapshots;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from lotfolio-core for convenience
pub use lotfolio_core::errors::{DatabaseError, Error, Result};

pub use lots::LotRepository;
pub use snapshots::SnapshotRepository;
