use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use mentor_core::domain::{Post, PostSummary};
use mentor_core::error::RepoError;
use mentor_core::ports::{BaseRepository, PostRepository};

/// In-memory `blogs` table.
///
/// Enforces the same unique-slug constraint as the hosted table, so the
/// services see identical failures from either backend.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn slug_taken(store: &HashMap<Uuid, Post>, slug: &str, except: Uuid) -> bool {
        store
            .values()
            .any(|existing| existing.slug == slug && existing.id != except)
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("duplicate id {}", post.id)));
        }
        if Self::slug_taken(&store, &post.slug, post.id) {
            return Err(RepoError::Constraint(format!("duplicate slug {}", post.slug)));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if Self::slug_taken(&store, &post.slug, post.id) {
            return Err(RepoError::Constraint(format!("duplicate slug {}", post.slug)));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self, limit: Option<usize>) -> Result<Vec<PostSummary>, RepoError> {
        let published: Vec<Post> = self
            .store
            .read()
            .await
            .values()
            .filter(|post| post.published)
            .cloned()
            .collect();

        let summaries = Self::newest_first(published)
            .iter()
            .map(Post::summary)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(summaries)
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|post| post.slug == slug && post.published)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|post| post.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let all = self.store.read().await.values().cloned().collect();
        Ok(Self::newest_first(all))
    }
}
