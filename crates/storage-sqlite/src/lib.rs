//! SQLite storage implementation for Pricebook.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `pricebook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (including the seeded reference price dataset)
//! - The price repository implementation
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `core` is database-agnostic and works with traits.
//!
//! ```text
//!       core (domain)
//!             │
//!             ▼
//!   storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod prices;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from pricebook-core for convenience
pub use pricebook_core::errors::{DatabaseError, Error, Result};
