//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod blog;
mod health;
mod sitemap;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/session", web::get().to(auth::session)),
            )
            // Public blog
            .service(
                web::scope("/blog")
                    .route("", web::get().to(blog::list))
                    .route("/teaser", web::get().to(blog::teaser))
                    .route("/{slug}", web::get().to(blog::detail)),
            )
            // Admin routes - guarded by the AdminAccess extractor
            .service(
                web::scope("/admin/posts")
                    .route("", web::get().to(admin::list_posts))
                    .route("", web::post().to(admin::create_post))
                    .route("/{id}", web::put().to(admin::update_post))
                    .route("/{id}", web::delete().to(admin::delete_post))
                    .route("/{id}/edit", web::get().to(admin::edit_form)),
            ),
    )
    .route("/sitemap.xml", web::get().to(sitemap::sitemap_xml))
    .route("/robots.txt", web::get().to(sitemap::robots_txt));
}
