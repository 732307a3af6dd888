use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use mentor_core::error::RepoError;

/// PostgreSQL unique violation, surfaced by PostgREST in the `code` field.
const UNIQUE_VIOLATION: &str = "23505";

/// Connection settings for a hosted Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    /// Server-side key sent as `apikey` and default bearer.
    pub api_key: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Read `SUPABASE_URL` / `SUPABASE_KEY`. `None` when either is unset.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok().filter(|v| !v.trim().is_empty())?;
        let api_key = std::env::var("SUPABASE_KEY").ok().filter(|v| !v.trim().is_empty())?;
        let timeout_secs = std::env::var("SUPABASE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Some(Self {
            url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid API key: {0}")]
    Key(String),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl SupabaseError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SupabaseError::Api { status, .. } => Some(*status),
            SupabaseError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            SupabaseError::Api { status: 409, .. }
        ) || matches!(
            self,
            SupabaseError::Api { code: Some(code), .. } if code == UNIQUE_VIOLATION
        )
    }
}

impl From<SupabaseError> for RepoError {
    fn from(e: SupabaseError) -> Self {
        if e.is_unique_violation() {
            return RepoError::Constraint(e.to_string());
        }
        match e {
            SupabaseError::Http(_) | SupabaseError::Url(_) | SupabaseError::Key(_) => {
                RepoError::Connection(e.to_string())
            }
            SupabaseError::Api { status, .. } if status >= 500 => RepoError::Connection(e.to_string()),
            SupabaseError::Api { .. } | SupabaseError::Parse(_) => RepoError::Query(e.to_string()),
        }
    }
}

/// Error bodies from PostgREST (`code`/`message`) and GoTrue (`msg`, `error_description`).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<serde_json::Value>,
    error_code: Option<String>,
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

impl ErrorBody {
    fn into_parts(self, fallback: String) -> (Option<String>, String) {
        let code = self.error_code.or(match self.code {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        });
        let message = self
            .message
            .or(self.msg)
            .or(self.error_description)
            .unwrap_or(fallback);
        (code, message)
    }
}

/// Thin REST client for a Supabase project.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    http: reqwest::Client,
    base: Url,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let base = Url::parse(&config.url)?.join("/")?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|e| SupabaseError::Key(e.to_string()))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| SupabaseError::Key(e.to_string()))?,
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("mentor-site/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                http,
                base,
            }),
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// `{base}/rest/v1/{table}?{query}`
    pub(crate) fn rest_url(&self, table: &str, query: &[(&str, String)]) -> Result<Url, SupabaseError> {
        self.url(&format!("rest/v1/{table}"), query)
    }

    /// `{base}/auth/v1/{path}?{query}`
    pub(crate) fn auth_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, SupabaseError> {
        self.url(&format!("auth/v1/{path}"), query)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, SupabaseError> {
        let mut url = self.inner.base.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Decode a JSON body, or turn a non-2xx response into [`SupabaseError::Api`].
    pub(crate) async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, SupabaseError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|e| SupabaseError::Parse(e.to_string()))
    }

    /// Require a 2xx response, discarding the body.
    pub(crate) async fn ok(resp: Response) -> Result<(), SupabaseError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = resp.bytes().await?;
        Err(api_error(status, &bytes))
    }
}

fn api_error(status: StatusCode, body: &[u8]) -> SupabaseError {
    let fallback = String::from_utf8_lossy(body).into_owned();
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let (code, message) = parsed.into_parts(fallback);
    SupabaseError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}

/// PostgREST equality filter value.
pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: url.to_string(),
            api_key: "service-key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_rest_url_with_filters() {
        let client = client("https://project.supabase.co");
        let url = client
            .rest_url(
                "blogs",
                &[
                    ("select", "id,title".to_string()),
                    ("published", eq(true)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/rest/v1/blogs?select=id%2Ctitle&published=eq.true&order=created_at.desc"
        );
    }

    #[test]
    fn test_auth_url_ignores_trailing_path() {
        let client = client("https://project.supabase.co/some/path/");
        let url = client
            .auth_url("token", &[("grant_type", "password".to_string())])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_invalid_project_url() {
        let result = SupabaseClient::new(&SupabaseConfig {
            url: "not a url".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(1),
        });

        assert!(matches!(result, Err(SupabaseError::Url(_))));
    }

    #[test]
    fn test_unique_violation_maps_to_constraint() {
        let by_code = api_error(
            StatusCode::CONFLICT,
            br#"{"code":"23505","message":"duplicate key value violates unique constraint \"blogs_slug_key\""}"#,
        );
        assert_eq!(by_code.status(), Some(409));
        assert!(matches!(RepoError::from(by_code), RepoError::Constraint(_)));
    }

    #[test]
    fn test_api_errors_map_by_status() {
        let bad_request = api_error(StatusCode::BAD_REQUEST, br#"{"code":"22P02","message":"bad uuid"}"#);
        let outage = api_error(StatusCode::SERVICE_UNAVAILABLE, b"upstream down");

        assert!(matches!(RepoError::from(bad_request), RepoError::Query(_)));
        assert!(matches!(RepoError::from(outage), RepoError::Connection(_)));
    }

    #[test]
    fn test_gotrue_error_body() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );

        match err {
            SupabaseError::Api { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("invalid_credentials"));
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
