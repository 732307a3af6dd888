//! In-memory content store - used when no hosted backend is configured.
//!
//! Data is lost on process restart.

mod posts;
mod roles;

pub use posts::InMemoryPostRepository;
pub use roles::InMemoryRoleRepository;

#[cfg(test)]
mod tests;
