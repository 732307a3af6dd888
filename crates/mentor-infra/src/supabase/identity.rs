//! Identity provider over the hosted GoTrue auth API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentor_core::domain::{Identity, Session};
use mentor_core::ports::{AuthError, IdentityProvider};

use super::client::{SupabaseClient, SupabaseError};

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserBody> for Identity {
    fn from(user: UserBody) -> Self {
        Self {
            user_id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: u64,
    user: UserBody,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<TokenBody> for Session {
    fn from(body: TokenBody) -> Self {
        Self {
            access_token: body.access_token,
            token_type: body.token_type,
            expires_in: body.expires_in,
            identity: body.user.into(),
        }
    }
}

pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn unavailable(e: impl std::fmt::Display) -> AuthError {
    AuthError::Unavailable(e.to_string())
}

/// GoTrue answers a rejected token with 401 or 403, and a vanished session with 404.
fn is_rejected_session(e: &SupabaseError) -> bool {
    matches!(e.status(), Some(401 | 403 | 404))
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self
            .client
            .auth_url("token", &[("grant_type", "password".to_string())])
            .map_err(unavailable)?;
        let resp = self
            .client
            .http()
            .post(url)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(unavailable)?;

        match SupabaseClient::json::<TokenBody>(resp).await {
            Ok(body) => Ok(body.into()),
            Err(e) if matches!(e.status(), Some(400 | 401 | 422)) => {
                tracing::debug!(error = %e, "Password grant rejected");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError> {
        let url = self.client.auth_url("user", &[]).map_err(unavailable)?;
        let resp = self
            .client
            .http()
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;

        match SupabaseClient::json::<UserBody>(resp).await {
            Ok(user) => Ok(Some(user.into())),
            Err(e) if is_rejected_session(&e) => Ok(None),
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.client.auth_url("logout", &[]).map_err(unavailable)?;
        let resp = self
            .client
            .http()
            .post(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(unavailable)?;

        match SupabaseClient::ok(resp).await {
            Ok(()) => Ok(()),
            Err(e) if is_rejected_session(&e) => Ok(()),
            Err(e) => Err(unavailable(e)),
        }
    }
}
