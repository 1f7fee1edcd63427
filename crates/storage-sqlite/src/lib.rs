//! SQLite storage implementation for tickerbrief.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the store traits defined in
//! `tickerbrief-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (the schema bootstrap)
//! - Repository implementations for bars and insights
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist; `core` is database-agnostic and works with traits.
//!
//! ```text
//!       core (domain traits)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod bars;
pub mod db;
pub mod errors;
pub mod insights;
pub mod schema;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use bars::BarRepository;
pub use insights::InsightRepository;
