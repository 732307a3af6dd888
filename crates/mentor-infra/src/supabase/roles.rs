use async_trait::async_trait;
use uuid::Uuid;

use mentor_core::domain::Role;
use mentor_core::error::RepoError;
use mentor_core::ports::RoleRepository;

use super::client::{SupabaseClient, eq};
use super::entity::{ROLES_TABLE, RoleRow};

/// Reads operator roles from the hosted `user_roles` table.
pub struct SupabaseRoleRepository {
    client: SupabaseClient,
}

impl SupabaseRoleRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleRepository for SupabaseRoleRepository {
    async fn find_role(&self, user_id: Uuid) -> Result<Role, RepoError> {
        let url = self.client.rest_url(
            ROLES_TABLE,
            &[
                ("select", "role".to_string()),
                ("user_id", eq(user_id)),
                ("limit", "1".to_string()),
            ],
        )?;
        let resp = self
            .client
            .http()
            .get(url)
            .send()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        let rows: Vec<RoleRow> = SupabaseClient::json(resp).await?;

        Ok(rows
            .first()
            .map(|row| Role::parse(&row.role))
            .unwrap_or(Role::None))
    }
}
