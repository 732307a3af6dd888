//! Operator accounts held in process, for running without the hosted backend.
//!
//! Used when no hosted identity service is configured (development, tests).
//! Passwords are stored as Argon2 hashes and sessions are signed JWTs.
//! Signed-out tokens are remembered until they would have expired anyway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use mentor_core::domain::{Identity, Session};
use mentor_core::ports::{AuthError, IdentityProvider, PasswordService, TokenService};

use super::jwt::{JwtConfig, JwtTokenService};
use super::password::Argon2PasswordService;

struct LocalAccount {
    user_id: Uuid,
    email: String,
    password_hash: String,
}

pub struct LocalIdentityProvider {
    /// Keyed by lowercased email.
    accounts: RwLock<HashMap<String, LocalAccount>>,
    /// Revoked token -> its expiry timestamp.
    revoked: RwLock<HashMap<String, i64>>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl LocalIdentityProvider {
    pub fn new(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            revoked: RwLock::new(HashMap::new()),
            tokens,
            passwords,
        }
    }

    /// JWT sessions with the given config and Argon2 password hashes.
    pub fn with_jwt(config: JwtConfig) -> Self {
        Self::new(
            Arc::new(JwtTokenService::new(config)),
            Arc::new(Argon2PasswordService::new()),
        )
    }

    /// Create or reset an account. Returns the account's user id.
    pub async fn register(&self, email: &str, password: &str) -> Result<Uuid, AuthError> {
        let key = normalize_email(email);
        if key.is_empty() || !key.contains('@') {
            return Err(AuthError::InvalidCredentials);
        }
        let password_hash = self.passwords.hash(password)?;

        let mut accounts = self.accounts.write().await;
        let user_id = accounts
            .get(&key)
            .map(|existing| existing.user_id)
            .unwrap_or_else(Uuid::new_v4);
        accounts.insert(
            key.clone(),
            LocalAccount {
                user_id,
                email: key,
                password_hash,
            },
        );

        Ok(user_id)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&normalize_email(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.generate_token(account.user_id, &account.email)?;
        Ok(Session {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: u64::try_from(self.tokens.expiration_seconds()).unwrap_or(0),
            identity: Identity {
                user_id: account.user_id,
                email: account.email.clone(),
            },
        })
    }

    async fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError> {
        if self.revoked.read().await.contains_key(access_token) {
            return Ok(None);
        }

        let claims = match self.tokens.validate_token(access_token) {
            Ok(claims) => claims,
            Err(AuthError::TokenExpired | AuthError::InvalidToken(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.user_id == claims.user_id)
            .map(|account| Identity {
                user_id: account.user_id,
                email: account.email.clone(),
            }))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let exp = match self.tokens.validate_token(access_token) {
            Ok(claims) => claims.exp,
            // Nothing to revoke.
            Err(AuthError::TokenExpired | AuthError::InvalidToken(_)) => return Ok(()),
            Err(e) => return Err(e),
        };

        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, expires_at| *expires_at > now);
        revoked.insert(access_token.to_string(), exp);
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
