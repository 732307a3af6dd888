//! Authentication implementations.

mod jwt;
mod local;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use local::LocalIdentityProvider;
pub use password::Argon2PasswordService;
