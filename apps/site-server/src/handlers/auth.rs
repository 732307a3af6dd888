//! Sign-in, sign-out and session lookup.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, ResponseError, web};

use mentor_core::domain::Identity;
use mentor_shared::ApiResponse;
use mentor_shared::dto::{AuthResponse, LoginRequest, SessionResponse, SessionUser};

use crate::middleware::auth::{SESSION_COOKIE, SessionToken};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::telemetry::mask_email;

fn session_user(identity: Identity) -> SessionUser {
    SessionUser {
        id: identity.user_id.to_string(),
        email: identity.email,
    }
}

/// POST /api/auth/login
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".to_string()));
    }

    let session = match state.admin.sign_in(req.email.trim(), &req.password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::info!(email = %mask_email(&req.email), error = %e, "Sign-in failed");
            return Err(e.into());
        }
    };
    tracing::info!(email = %mask_email(&session.identity.email), "Signed in");

    let cookie = Cookie::build(SESSION_COOKIE, session.access_token.clone())
        .path("/")
        .http_only(true)
        .secure(state.site.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(
            i64::try_from(session.expires_in).unwrap_or(i64::MAX),
        ))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        access_token: session.access_token,
        token_type: session.token_type,
        expires_in: session.expires_in,
        user: session_user(session.identity),
    }))
}

/// POST /api/auth/logout
///
/// The session cookie is cleared even when the identity provider cannot
/// revoke the session.
pub async fn logout(state: web::Data<AppState>, token: SessionToken) -> AppResult<HttpResponse> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    if let Some(token) = &token.0 {
        if let Err(e) = state.admin.sign_out(token).await {
            tracing::warn!(error = %e, "Sign-out failed; clearing cookie anyway");
            let mut resp = AppError::from(e).error_response();
            resp.add_cookie(&cookie)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            return Ok(resp);
        }
        tracing::debug!("Session revoked");
    }

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::<()>::message("Signed out")))
}

/// GET /api/auth/session - lets the sign-in page skip straight to the admin area.
pub async fn session(state: web::Data<AppState>, token: SessionToken) -> HttpResponse {
    let Some(token) = token.0 else {
        return HttpResponse::Ok().json(SessionResponse::anonymous());
    };

    let response = match state.admin.session_identity(&token).await {
        Ok(Some(identity)) => SessionResponse::signed_in(session_user(identity)),
        Ok(None) => SessionResponse::anonymous(),
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed");
            SessionResponse::anonymous()
        }
    };

    HttpResponse::Ok().json(response)
}
