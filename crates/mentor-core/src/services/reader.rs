//! Public blog renderer: listing and detail views for anonymous readers.

use serde::Serialize;

use super::posts::PostService;
use crate::domain::{Post, PostSummary};
use crate::error::DomainError;

/// Number of posts in the homepage teaser.
pub const TEASER_LIMIT: usize = 3;
/// The full blog index, used as the way back from a missing post.
pub const BLOG_INDEX_PATH: &str = "/blog";

const UNAVAILABLE_NOTICE: &str = "Blog posts are temporarily unavailable";

/// A list of published posts. An empty list is a normal state.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub posts: Vec<PostSummary>,
    /// Transient notice when the content store could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ListingView {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// A single post, or the state shown in its place.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView {
    Found {
        post: Post,
    },
    NotFound {
        slug: String,
        back_link: &'static str,
    },
    Unavailable {
        notice: String,
        back_link: &'static str,
    },
}

/// Read-only views over published posts. Never fails the page.
#[derive(Clone)]
pub struct BlogReader {
    posts: PostService,
}

impl BlogReader {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }

    /// The three newest posts for the homepage.
    pub async fn teaser(&self) -> ListingView {
        self.listing(Some(TEASER_LIMIT)).await
    }

    /// Published posts, newest first; unbounded when `limit` is `None`.
    pub async fn listing(&self, limit: Option<usize>) -> ListingView {
        match self.posts.list_published(limit).await {
            Ok(posts) => ListingView {
                posts,
                notice: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Listing published posts failed; rendering empty list");
                ListingView {
                    posts: Vec::new(),
                    notice: Some(UNAVAILABLE_NOTICE.to_string()),
                }
            }
        }
    }

    pub async fn detail(&self, slug: &str) -> DetailView {
        match self.posts.get_by_slug(slug).await {
            Ok(post) => DetailView::Found { post },
            Err(DomainError::NotFound { .. }) => DetailView::NotFound {
                slug: slug.to_string(),
                back_link: BLOG_INDEX_PATH,
            },
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Loading post failed");
                DetailView::Unavailable {
                    notice: UNAVAILABLE_NOTICE.to_string(),
                    back_link: BLOG_INDEX_PATH,
                }
            }
        }
    }
}
