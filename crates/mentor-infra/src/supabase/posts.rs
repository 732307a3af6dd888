//! Post repository over the PostgREST `blogs` endpoint.

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use uuid::Uuid;

use mentor_core::domain::{Post, PostSummary};
use mentor_core::error::RepoError;
use mentor_core::ports::{BaseRepository, PostRepository};

use super::client::{SupabaseClient, eq};
use super::entity::{BLOGS_TABLE, BlogPatch, BlogRow, SUMMARY_COLUMNS, SummaryRow};

const NEWEST_FIRST: &str = "created_at.desc";

pub struct SupabasePostRepository {
    client: SupabaseClient,
}

impl SupabasePostRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn select_rows(&self, query: &[(&str, String)]) -> Result<Vec<BlogRow>, RepoError> {
        let url = self.client.rest_url(BLOGS_TABLE, query)?;
        let resp = self
            .client
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        Ok(SupabaseClient::json(resp).await?)
    }

    async fn select_one(&self, query: &[(&str, String)]) -> Result<Option<Post>, RepoError> {
        let rows = self.select_rows(query).await?;
        Ok(rows.into_iter().next().map(Into::into))
    }

    /// Send a write and decode the representation PostgREST echoes back.
    async fn write(&self, req: reqwest::RequestBuilder) -> Result<Vec<BlogRow>, RepoError> {
        let resp = req
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        Ok(SupabaseClient::json(resp).await?)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for SupabasePostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.select_one(&[("select", "*".to_string()), ("id", eq(id))])
            .await
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let url = self.client.rest_url(BLOGS_TABLE, &[])?;
        let rows = self
            .write(self.client.http().post(url).json(&BlogRow::from(&post)))
            .await?;

        tracing::debug!(post_id = %post.id, slug = %post.slug, "Inserted blog row");
        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| RepoError::Query("insert returned no row".to_string()))
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let url = self.client.rest_url(BLOGS_TABLE, &[("id", eq(post.id))])?;
        let rows = self
            .write(self.client.http().patch(url).json(&BlogPatch::from(&post)))
            .await?;

        rows.into_iter().next().map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let url = self.client.rest_url(BLOGS_TABLE, &[("id", eq(id))])?;
        let rows = self.write(self.client.http().delete(url)).await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl PostRepository for SupabasePostRepository {
    async fn list_published(&self, limit: Option<usize>) -> Result<Vec<PostSummary>, RepoError> {
        let mut query = vec![
            ("select", SUMMARY_COLUMNS.to_string()),
            ("published", eq(true)),
            ("order", NEWEST_FIRST.to_string()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let url = self.client.rest_url(BLOGS_TABLE, &query)?;
        let resp = self
            .client
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        let rows: Vec<SummaryRow> = SupabaseClient::json(resp).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.select_one(&[
            ("select", "*".to_string()),
            ("slug", eq(slug)),
            ("published", eq(true)),
        ])
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.select_one(&[("select", "*".to_string()), ("slug", eq(slug))])
            .await
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self
            .select_rows(&[
                ("select", "*".to_string()),
                ("order", NEWEST_FIRST.to_string()),
            ])
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
