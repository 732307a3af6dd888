use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::{derive_slug, is_valid_slug};
use crate::error::DomainError;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// HTML body.
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post from validated draft fields.
    pub fn new(author_id: Uuid, fields: PostFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: fields.title,
            slug: fields.slug,
            excerpt: fields.excerpt,
            content: fields.content,
            cover_image: fields.cover_image,
            published: fields.published,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Replace every mutable field and stamp the update time.
    pub fn apply(&mut self, fields: PostFields) {
        self.title = fields.title;
        self.slug = fields.slug;
        self.excerpt = fields.excerpt;
        self.content = fields.content;
        self.cover_image = fields.cover_image;
        self.published = fields.published;
        self.updated_at = Some(Utc::now());
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            cover_image: self.cover_image.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The listing projection of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostSummary {
    /// Update time when present, creation time otherwise.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Post form as submitted by an operator.
///
/// `slug` is an optional override; when absent the slug is derived from the
/// title. Blank optional fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Draft fields that passed validation. The slug is final.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub published: bool,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = Some(url.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Validate the draft and resolve its final slug.
    pub fn validate(&self) -> Result<PostFields, DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".to_string()));
        }

        let slug = match non_blank(&self.slug) {
            Some(explicit) => {
                let explicit = explicit.trim();
                if !is_valid_slug(explicit) {
                    return Err(DomainError::Validation(format!(
                        "slug '{explicit}' must be lowercase letters, digits and single hyphens"
                    )));
                }
                explicit.to_string()
            }
            None => {
                let derived = derive_slug(&self.title);
                if derived.is_empty() {
                    return Err(DomainError::Validation(
                        "title must contain at least one letter or digit".to_string(),
                    ));
                }
                derived
            }
        };

        let cover_image = non_blank(&self.cover_image);
        if let Some(cover) = &cover_image {
            validate_cover_url(cover)?;
        }

        Ok(PostFields {
            title: self.title.clone(),
            slug,
            excerpt: non_blank(&self.excerpt),
            content: self.content.clone(),
            cover_image,
            published: self.published,
        })
    }
}

/// Pre-fill a draft from a post's current values (the edit form).
impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: Some(post.slug.clone()),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            published: post.published,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn validate_cover_url(raw: &str) -> Result<(), DomainError> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| DomainError::Validation(format!("cover image is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DomainError::Validation(format!(
            "cover image must be an http(s) URL, got '{other}'"
        ))),
    }
}
