//! Row shapes of the hosted `blogs` and `user_roles` tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentor_core::domain::{Post, PostSummary};

pub const BLOGS_TABLE: &str = "blogs";
pub const ROLES_TABLE: &str = "user_roles";

/// Columns selected for listings.
pub const SUMMARY_COLUMNS: &str = "id,title,slug,excerpt,cover_image,created_at,updated_at";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogRow {
    pub id: Uuid,
    /// Nullable in the hosted schema.
    pub author_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Conversion from a stored row to the domain post.
impl From<BlogRow> for Post {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id.unwrap_or_default(),
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            content: row.content,
            cover_image: row.cover_image,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<&Post> for BlogRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author_id: Some(post.author_id),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// PATCH body for an edit. Identity, authorship and creation time are never sent.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPatch {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Post> for BlogPatch {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            published: post.published,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SummaryRow> for PostSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            cover_image: row.cover_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleRow {
    pub role: String,
}
