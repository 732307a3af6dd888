//! # Mentor Infrastructure
//!
//! Concrete implementations of the ports defined in `mentor-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All backends enabled
//! - `minimal` - In-memory content store and local identity only
//! - `supabase` - Hosted PostgREST content store and GoTrue identity

pub mod auth;
pub mod memory;

#[cfg(feature = "supabase")]
pub mod supabase;

// Re-exports - Local
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, LocalIdentityProvider};
pub use memory::{InMemoryPostRepository, InMemoryRoleRepository};

// Re-exports - Supabase
#[cfg(feature = "supabase")]
pub use supabase::{
    SupabaseClient, SupabaseConfig, SupabaseError, SupabaseIdentityProvider,
    SupabasePostRepository, SupabaseRoleRepository,
};
