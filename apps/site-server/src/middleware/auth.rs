//! Session extractors.
//!
//! The session token is read from an `Authorization: Bearer` header, falling
//! back to the HTTP-only `session` cookie set at sign-in.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};

use mentor_core::services::{AdminIdentity, Authorization};

use super::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

fn token_from_request(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty()),
    }
}

/// The caller's session token, if any. Never fails.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl FromRequest for SessionToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(SessionToken(token_from_request(req))))
    }
}

/// Admin access extractor.
///
/// Runs the admin guard; refused callers get a `303 See Other` to the
/// sign-in page or the public home page:
/// ```ignore
/// async fn dashboard(access: AdminAccess) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AdminAccess(pub AdminIdentity);

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = token_from_request(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AppError::Internal("Server configuration error".to_string())
            })?;

            match state.admin.authorize(token.as_deref()).await {
                Authorization::Authorized(admin) => Ok(AdminAccess(admin)),
                refused => match refused.redirect() {
                    Some(redirect) => Err(AppError::Redirect(redirect)),
                    None => Err(AppError::Forbidden),
                },
            }
        })
    }
}
