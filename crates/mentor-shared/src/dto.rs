//! Data Transfer Objects - request/response types for the API.
//!
//! Ids and timestamps travel as strings so a browser client can use these
//! types without the server's domain crates.

use serde::{Deserialize, Serialize};

/// Request to sign in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// Response containing the session token. The same token is also set as a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: SessionUser,
}

/// Whether the caller already holds a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

/// `?limit=` on listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// `?confirm=` on the admin delete endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    /// False when the post was already gone.
    pub deleted: bool,
}
