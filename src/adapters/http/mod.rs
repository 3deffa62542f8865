//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod membership;

// Re-export key types for convenience
pub use membership::membership_router;
pub use membership::MembershipAppState;
