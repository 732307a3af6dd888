//! # Mentor Core
//!
//! The domain layer of the mentor site's blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post model and slug rules, the ports the content store and identity
//! provider must implement, and the services built on top of them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
