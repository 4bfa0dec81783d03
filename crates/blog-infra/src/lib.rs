//! # Blog Infrastructure
//!
//! Concrete implementations of the store port defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SQL store via SeaORM
//!
//! Without `postgres` only the in-memory store is available.

pub mod database;
pub mod memory;
pub mod store;

pub use memory::InMemoryPostRepository;
pub use store::StoreKind;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository};
