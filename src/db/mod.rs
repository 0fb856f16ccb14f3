//! Database module: connection handling, models and schema for the relational store.
//!
//! Layout:
//! - `connection.rs`: per-request connection provider and owning handle
//! - `models.rs`: Rust structs mirroring DB rows and aggregate projections
//! - `queries.rs`: parameterized SQL for every endpoint
//! - `schema.rs`: SQL DDL for initializing the database

pub mod connection;
pub mod models;
pub mod queries;
pub mod schema;

pub use connection::{ConnectionProvider, DbConnection};
