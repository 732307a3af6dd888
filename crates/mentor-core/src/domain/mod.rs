//! Domain entities - the core business objects.

mod identity;
mod post;
mod role;
pub mod slug;

pub use identity::{Identity, Session};
pub use post::{Post, PostDraft, PostFields, PostSummary};
pub use role::Role;
