use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use mentor_core::domain::Role;
use mentor_core::error::RepoError;
use mentor_core::ports::RoleRepository;

/// In-memory `user_roles` table.
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<Uuid, Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
        }
    }

    /// Provision a role, as an operator would in the hosted dashboard.
    pub async fn assign(&self, user_id: Uuid, role: Role) {
        self.roles.write().await.insert(user_id, role);
    }
}

impl Default for InMemoryRoleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_role(&self, user_id: Uuid) -> Result<Role, RepoError> {
        Ok(self
            .roles
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or(Role::None))
    }
}
