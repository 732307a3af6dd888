//! Admin post management. Every handler takes [`AdminAccess`], so a refused
//! caller is redirected and nothing is written. Body extractors run alongside
//! the guard, and a malformed body can still be rejected with 400 while a
//! slow identity provider is answering.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use mentor_core::domain::PostDraft;
use mentor_core::services::{AdminDelete, Confirmation, DeleteOutcome};
use mentor_shared::dto::{DeleteQuery, DeleteResponse};

use crate::middleware::auth::AdminAccess;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/posts - every post, drafts included.
pub async fn list_posts(state: web::Data<AppState>, access: AdminAccess) -> AppResult<HttpResponse> {
    let posts = state.admin.dashboard(&access.0).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/admin/posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    access: AdminAccess,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let draft = state.admin.edit_form(&access.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(draft))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    access: AdminAccess,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state.admin.submit(&access.0, None, &body).await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    access: AdminAccess,
    id: web::Path<Uuid>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state
        .admin
        .submit(&access.0, Some(id.into_inner()), &body)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/admin/posts/{id}?confirm=true
pub async fn delete_post(
    state: web::Data<AppState>,
    access: AdminAccess,
    id: web::Path<Uuid>,
    query: web::Query<DeleteQuery>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    match state
        .admin
        .delete(&access.0, id, Confirmation::from(query.confirm))
        .await?
    {
        AdminDelete::ConfirmationRequired => Err(AppError::BadRequest(
            "Deleting a post is permanent; repeat the request with ?confirm=true".to_string(),
        )),
        AdminDelete::Done(outcome) => Ok(HttpResponse::Ok().json(DeleteResponse {
            id: id.to_string(),
            deleted: outcome == DeleteOutcome::Deleted,
        })),
    }
}
