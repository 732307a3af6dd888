//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "supabase")]
use mentor_infra::SupabaseConfig;
use mentor_infra::JwtConfig;

const DEFAULT_SITE_URL: &str = "https://tradingwithjsrao.com";
const DEFAULT_SITEMAP_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=600";

/// Operator account seeded into the local identity provider.
#[derive(Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Public origin used for absolute sitemap URLs.
    pub site_url: String,
    pub sitemap_cache_control: String,
    /// Set the `Secure` attribute on the session cookie.
    pub secure_cookies: bool,
    /// Hosted backend; `None` runs on the in-memory store.
    #[cfg(feature = "supabase")]
    pub supabase: Option<SupabaseConfig>,
    pub jwt: JwtConfig,
    pub seed_admin: Option<SeedAdmin>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let seed_admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(SeedAdmin { email, password })
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string()),
            sitemap_cache_control: env::var("SITEMAP_CACHE_CONTROL")
                .unwrap_or_else(|_| DEFAULT_SITEMAP_CACHE_CONTROL.to_string()),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            #[cfg(feature = "supabase")]
            supabase: SupabaseConfig::from_env(),
            jwt: Self::jwt_from_env(),
            seed_admin,
        }
    }

    /// Session token settings for the local identity provider.
    fn jwt_from_env() -> JwtConfig {
        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        if jwt.uses_dev_secret() {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        jwt
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_url: DEFAULT_SITE_URL.to_string(),
            sitemap_cache_control: DEFAULT_SITEMAP_CACHE_CONTROL.to_string(),
            secure_cookies: true,
            #[cfg(feature = "supabase")]
            supabase: None,
            jwt: JwtConfig::default(),
            seed_admin: None,
        }
    }
}
