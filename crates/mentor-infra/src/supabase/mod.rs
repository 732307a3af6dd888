//! Hosted Supabase backend: PostgREST content store and GoTrue identity.

mod client;
mod entity;
mod identity;
mod posts;
mod roles;

pub use client::{SupabaseClient, SupabaseConfig, SupabaseError};
pub use identity::SupabaseIdentityProvider;
pub use posts::SupabasePostRepository;
pub use roles::SupabaseRoleRepository;
