//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MembershipRepository` - Write side of membership persistence
//! - `MembershipReader` - Read side (queries and list views)
//! - `UserDirectory` - Lookup into the externally-owned user store

mod membership_reader;
mod membership_repository;
mod user_directory;

pub use membership_reader::{MembershipReader, MembershipView};
pub use membership_repository::MembershipRepository;
pub use user_directory::{UserDirectory, UserRef};
