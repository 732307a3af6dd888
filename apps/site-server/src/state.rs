//! Application state - shared across all handlers.

use std::sync::Arc;

use mentor_core::domain::Role;
use mentor_core::ports::{IdentityProvider, PostRepository, RoleRepository};
use mentor_core::services::{AdminGuard, AdminManager, BlogReader, PostService, SitemapGenerator};
use mentor_infra::{InMemoryPostRepository, InMemoryRoleRepository, LocalIdentityProvider};

use crate::config::{AppConfig, SeedAdmin};
use crate::telemetry::mask_email;

/// Response settings that do not belong to any service.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub sitemap_cache_control: String,
    pub secure_cookies: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub admin: AdminManager,
    pub reader: BlogReader,
    pub sitemap: SitemapGenerator,
    pub site: SiteSettings,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "supabase")]
        if let Some(supabase) = &config.supabase {
            match mentor_infra::SupabaseClient::new(supabase) {
                Ok(client) => {
                    tracing::info!(url = %supabase.url, "Using hosted content store and identity provider");
                    return Self::from_parts(
                        config,
                        Arc::new(mentor_infra::SupabasePostRepository::new(client.clone())),
                        Arc::new(mentor_infra::SupabaseIdentityProvider::new(client.clone())),
                        Arc::new(mentor_infra::SupabaseRoleRepository::new(client)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to build Supabase client: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("SUPABASE_URL/SUPABASE_KEY not set. Running in in-memory mode.");
        }

        #[cfg(not(feature = "supabase"))]
        tracing::info!("Running without supabase feature - using in-memory content store");

        Self::local(config).await
    }

    /// In-memory content store with local sign-in, seeded with the configured operator.
    pub async fn local(config: &AppConfig) -> Self {
        let identity = Arc::new(LocalIdentityProvider::with_jwt(config.jwt.clone()));
        let roles = Arc::new(InMemoryRoleRepository::new());

        match &config.seed_admin {
            Some(seed) => seed_operator(&identity, &roles, seed).await,
            None => tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set. No operator can sign in."),
        }

        Self::from_parts(
            config,
            Arc::new(InMemoryPostRepository::new()),
            identity,
            roles,
        )
    }

    pub fn from_parts(
        config: &AppConfig,
        posts: Arc<dyn PostRepository>,
        identity: Arc<dyn IdentityProvider>,
        roles: Arc<dyn RoleRepository>,
    ) -> Self {
        let posts = PostService::new(posts);
        let admin = AdminManager::new(AdminGuard::new(identity, roles), posts.clone());

        tracing::info!("Application state initialized");

        Self {
            admin,
            reader: BlogReader::new(posts.clone()),
            sitemap: SitemapGenerator::new(posts, &config.site_url),
            site: SiteSettings {
                sitemap_cache_control: config.sitemap_cache_control.clone(),
                secure_cookies: config.secure_cookies,
            },
        }
    }
}

async fn seed_operator(
    identity: &LocalIdentityProvider,
    roles: &InMemoryRoleRepository,
    seed: &SeedAdmin,
) {
    match identity.register(&seed.email, &seed.password).await {
        Ok(user_id) => {
            roles.assign(user_id, Role::Admin).await;
            tracing::info!(email = %mask_email(&seed.email), %user_id, "Seeded local operator");
        }
        Err(e) => {
            tracing::error!(email = %mask_email(&seed.email), error = %e, "Failed to seed local operator");
        }
    }
}
