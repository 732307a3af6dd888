use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostSummary, Role};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return the stored representation.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether a row was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// The `blogs` table of the content store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Published posts, newest first, optionally capped at `limit`.
    async fn list_published(&self, limit: Option<usize>) -> Result<Vec<PostSummary>, RepoError>;

    /// A published post with this slug.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Any post with this slug, regardless of publish state.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Every post, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
}

/// The `user_roles` table. Provisioned outside this system, read only here.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Role assigned to `user_id`; `Role::None` when there is no row.
    async fn find_role(&self, user_id: Uuid) -> Result<Role, RepoError>;
}
