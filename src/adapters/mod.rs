//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed persistence for the membership ports
//! - `memory` - in-memory store for tests and local development
//! - `http` - axum REST surface over the application handlers

pub mod http;
pub mod memory;
pub mod postgres;
