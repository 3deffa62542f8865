//! ComicHub Memberships - Membership lifecycle service
//!
//! This crate manages platform memberships: plan-based expiration dates,
//! block/unblock status, and the link between a membership and its owning
//! user account.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
