//! Repository accessor for blog posts.

use std::sync::Arc;

use uuid::Uuid;

use super::admin::AdminIdentity;
use crate::domain::{Post, PostDraft, PostSummary};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Result of a delete request. Deleting an absent post is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// Validated CRUD over the `blogs` table.
///
/// Read operations are public. Every operation that can see drafts or write
/// takes an [`AdminIdentity`], which only the admin guard can produce.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Published posts, newest first. An empty store yields an empty vector.
    pub async fn list_published(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PostSummary>, DomainError> {
        Ok(self.repo.list_published(limit).await?)
    }

    /// The published post with this slug.
    ///
    /// Stored slugs are matched as-is, so rows saved before slug rules were
    /// enforced stay reachable. Only a slug that cannot be a path segment is
    /// refused without asking the store.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        if slug.is_empty() || slug.contains('/') {
            return Err(DomainError::post_not_found(slug));
        }

        self.repo
            .find_published_by_slug(slug)
            .await?
            .filter(|post| post.published)
            .ok_or_else(|| DomainError::post_not_found(slug))
    }

    /// Every post regardless of publish state, newest first.
    pub async fn list_all(&self, _admin: &AdminIdentity) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_all().await?)
    }

    /// Any post by id, drafts included.
    pub async fn find(&self, _admin: &AdminIdentity, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(
        &self,
        admin: &AdminIdentity,
        draft: &PostDraft,
    ) -> Result<Post, DomainError> {
        let fields = draft.validate()?;
        self.ensure_slug_free(&fields.slug, None).await?;

        let post = Post::new(admin.user_id(), fields);
        let saved = self.repo.insert(post).await?;

        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");
        Ok(saved)
    }

    /// Replace the mutable fields of an existing post.
    pub async fn update(
        &self,
        _admin: &AdminIdentity,
        id: Uuid,
        draft: &PostDraft,
    ) -> Result<Post, DomainError> {
        let fields = draft.validate()?;

        let mut post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        self.ensure_slug_free(&fields.slug, Some(id)).await?;

        post.apply(fields);
        let saved = match self.repo.update(post).await {
            Ok(saved) => saved,
            Err(RepoError::NotFound) => return Err(DomainError::post_not_found(id)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post updated");
        Ok(saved)
    }

    /// Permanently remove a post.
    pub async fn delete(
        &self,
        _admin: &AdminIdentity,
        id: Uuid,
    ) -> Result<DeleteOutcome, DomainError> {
        if self.repo.delete(id).await? {
            tracing::info!(post_id = %id, "Post deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            tracing::info!(post_id = %id, "Delete requested for a post that no longer exists");
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<Uuid>) -> Result<(), DomainError> {
        match self.repo.find_by_slug(slug).await? {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::Conflict(format!(
                "slug '{slug}' is already used by another post"
            ))),
            _ => Ok(()),
        }
    }
}
