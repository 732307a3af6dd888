//! Admin blog manager: the access guard and the operator workflow.
//!
//! Access is decided per request by [`AdminGuard::authorize`]:
//!
//! ```text
//! Unauthenticated -> Checking -> Authorized(admin)
//!                             -> Denied
//! ```
//!
//! `Checking` is the guard call itself (session lookup, then role lookup).
//! Sign-out returns the caller to `Unauthenticated`.

use std::sync::Arc;

use uuid::Uuid;

use super::posts::{DeleteOutcome, PostService};
use crate::domain::{Identity, Post, PostDraft, Role, Session};
use crate::error::DomainError;
use crate::ports::{AuthError, IdentityProvider, RoleRepository};

/// Sign-in surface for callers without a session.
pub const SIGN_IN_PATH: &str = "/login";
/// Public page for callers without admin privileges.
pub const PUBLIC_HOME_PATH: &str = "/";

/// Proof that the guard authorized this identity for admin work.
///
/// Only [`AdminGuard`] constructs it, so privileged [`PostService`] calls
/// cannot be made without passing the guard first.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    identity: Identity,
    role: Role,
}

impl AdminIdentity {
    pub fn user_id(&self) -> Uuid {
        self.identity.user_id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Outcome of the admin access check.
#[derive(Debug, Clone)]
pub enum Authorization {
    Authorized(AdminIdentity),
    /// Signed in, but without an admin role.
    Denied,
    /// No live session.
    Unauthenticated,
}

/// Where a refused caller is sent, and the notice shown there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub location: &'static str,
    pub notice: &'static str,
}

impl Authorization {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Authorization::Authorized(_))
    }

    /// The redirect for a refused caller; `None` when authorized.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Authorization::Authorized(_) => None,
            Authorization::Denied => Some(Redirect {
                location: PUBLIC_HOME_PATH,
                notice: "Access denied: Admin privileges required",
            }),
            Authorization::Unauthenticated => Some(Redirect {
                location: SIGN_IN_PATH,
                notice: "Please log in to access this page",
            }),
        }
    }
}

/// Session + role check for admin operations.
#[derive(Clone)]
pub struct AdminGuard {
    identity: Arc<dyn IdentityProvider>,
    roles: Arc<dyn RoleRepository>,
}

impl AdminGuard {
    pub fn new(identity: Arc<dyn IdentityProvider>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { identity, roles }
    }

    /// Decide whether the holder of `access_token` may manage posts.
    ///
    /// Provider or role-table failures never escalate: an unreachable
    /// identity provider reads as no session, a failed role lookup as denied.
    pub async fn authorize(&self, access_token: Option<&str>) -> Authorization {
        let Some(token) = access_token.filter(|t| !t.trim().is_empty()) else {
            return Authorization::Unauthenticated;
        };

        let identity = match self.identity.current_identity(token).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                tracing::debug!("Session token does not match a live session");
                return Authorization::Unauthenticated;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
                return Authorization::Unauthenticated;
            }
        };

        match self.roles.find_role(identity.user_id).await {
            Ok(role) if role.can_manage_posts() => {
                tracing::debug!(user_id = %identity.user_id, role = role.as_str(), "Admin authorized");
                Authorization::Authorized(AdminIdentity { identity, role })
            }
            Ok(role) => {
                tracing::info!(user_id = %identity.user_id, role = role.as_str(), "Admin access denied");
                Authorization::Denied
            }
            Err(e) => {
                tracing::warn!(user_id = %identity.user_id, error = %e, "Role lookup failed; denying access");
                Authorization::Denied
            }
        }
    }
}

/// Whether the operator confirmed a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Pending,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Pending
        }
    }
}

/// Result of an admin delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDelete {
    /// Nothing was deleted; the operator must confirm first.
    ConfirmationRequired,
    Done(DeleteOutcome),
}

/// Operator workflow: sign in, list, edit, submit, delete, sign out.
#[derive(Clone)]
pub struct AdminManager {
    guard: AdminGuard,
    posts: PostService,
}

impl AdminManager {
    pub fn new(guard: AdminGuard, posts: PostService) -> Self {
        Self { guard, posts }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.guard.identity.sign_in(email, password).await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.guard.identity.sign_out(access_token).await
    }

    /// Identity behind a token, without any role requirement.
    pub async fn session_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError> {
        self.guard.identity.current_identity(access_token).await
    }

    pub async fn authorize(&self, access_token: Option<&str>) -> Authorization {
        self.guard.authorize(access_token).await
    }

    /// All posts, drafts included.
    pub async fn dashboard(&self, admin: &AdminIdentity) -> Result<Vec<Post>, DomainError> {
        self.posts.list_all(admin).await
    }

    /// The edit form pre-filled from the post's current values.
    pub async fn edit_form(&self, admin: &AdminIdentity, id: Uuid) -> Result<PostDraft, DomainError> {
        let post = self.posts.find(admin, id).await?;
        Ok(PostDraft::from(&post))
    }

    /// Create a post, or update `editing` when set.
    pub async fn submit(
        &self,
        admin: &AdminIdentity,
        editing: Option<Uuid>,
        draft: &PostDraft,
    ) -> Result<Post, DomainError> {
        match editing {
            Some(id) => self.posts.update(admin, id, draft).await,
            None => self.posts.create(admin, draft).await,
        }
    }

    pub async fn delete(
        &self,
        admin: &AdminIdentity,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<AdminDelete, DomainError> {
        if confirmation == Confirmation::Pending {
            return Ok(AdminDelete::ConfirmationRequired);
        }
        Ok(AdminDelete::Done(self.posts.delete(admin, id).await?))
    }
}
