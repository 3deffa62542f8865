//! HTTP adapter for membership endpoints.
//!
//! Thin layer over the application handlers: DTO mapping, path-parameter
//! parsing, and error-to-status translation live here and nowhere else.

mod dto;
mod handlers;
mod routes;

pub use handlers::MembershipAppState;
pub use routes::{membership_router, membership_routes};
