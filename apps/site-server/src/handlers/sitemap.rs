use actix_web::{HttpResponse, http::header, web};

use crate::state::AppState;

/// GET /sitemap.xml
pub async fn sitemap_xml(state: web::Data<AppState>) -> HttpResponse {
    let sitemap = state.sitemap.generate().await;
    tracing::debug!(
        urls = sitemap.entries.len(),
        includes_posts = sitemap.includes_posts,
        "Sitemap generated"
    );

    HttpResponse::Ok()
        .content_type("application/xml; charset=UTF-8")
        .insert_header((header::CACHE_CONTROL, state.site.sitemap_cache_control.clone()))
        .body(sitemap.to_xml())
}

/// GET /robots.txt
pub async fn robots_txt(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=UTF-8")
        .body(state.sitemap.robots_txt())
}
