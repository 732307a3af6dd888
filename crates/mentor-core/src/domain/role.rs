use serde::{Deserialize, Serialize};

/// Privilege level assigned to an identity in the `user_roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Superadmin,
    /// No assignment, or one this site does not recognise.
    None,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "admin" => Role::Admin,
            "superadmin" => Role::Superadmin,
            _ => Role::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
            Role::None => "none",
        }
    }

    /// Whether this role may manage blog posts.
    pub fn can_manage_posts(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}
