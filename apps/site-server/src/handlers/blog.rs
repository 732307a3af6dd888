//! Public blog endpoints. These never fail the page: store trouble shows up
//! as an empty listing with a notice, or an `unavailable` detail state.

use actix_web::{HttpResponse, web};

use mentor_core::services::DetailView;
use mentor_shared::dto::ListQuery;

use crate::state::AppState;

/// GET /api/blog?limit=N
pub async fn list(state: web::Data<AppState>, query: web::Query<ListQuery>) -> HttpResponse {
    HttpResponse::Ok().json(state.reader.listing(query.limit).await)
}

/// GET /api/blog/teaser
pub async fn teaser(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.reader.teaser().await)
}

/// GET /api/blog/{slug}
pub async fn detail(state: web::Data<AppState>, slug: web::Path<String>) -> HttpResponse {
    let view = state.reader.detail(&slug).await;
    let mut response = match view {
        DetailView::Found { .. } => HttpResponse::Ok(),
        DetailView::NotFound { .. } => HttpResponse::NotFound(),
        DetailView::Unavailable { .. } => HttpResponse::ServiceUnavailable(),
    };
    response.json(view)
}
