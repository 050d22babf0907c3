use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::dto::permission_dto::RoleGrants;
use crate::error::{Error, Result};
use crate::models::authz::{is_allowed, Ability, Role};
use crate::utils::token::Claims;

#[derive(Clone)]
pub struct PermissionService {
    pool: PgPool,
}

impl PermissionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's effective ability set. Admin gets the full catalog
    /// without touching the table. Grants are read fresh on every call;
    /// no cross-request caching, so a revoke takes effect immediately.
    pub async fn grants_for(&self, role: Role) -> Result<Vec<Ability>> {
        if role.is_admin() {
            return Ok(Ability::ALL.to_vec());
        }
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT ability FROM role_abilities WHERE role = $1 ORDER BY ability")
                .bind(role.as_str())
                .fetch_all(&self.pool)
                .await?;
        // Unknown keys in the table (manual inserts, removed abilities)
        // are skipped rather than failing the whole lookup.
        Ok(rows.iter().filter_map(|r| Ability::parse(r)).collect())
    }

    /// The per-request authorization gate. Pure read; 403 on a missing
    /// grant, before any handler side effects.
    pub async fn require(&self, claims: &Claims, ability: Ability) -> Result<Role> {
        let role = Role::parse(&claims.role)
            .ok_or_else(|| Error::Forbidden("unknown_role".to_string()))?;
        let grants = self.grants_for(role).await?;
        if is_allowed(role, ability, &grants) {
            Ok(role)
        } else {
            Err(Error::Forbidden("forbidden".to_string()))
        }
    }

    pub fn require_admin(&self, claims: &Claims) -> Result<Role> {
        let role = Role::parse(&claims.role)
            .ok_or_else(|| Error::Forbidden("unknown_role".to_string()))?;
        if role.is_admin() {
            Ok(role)
        } else {
            Err(Error::Forbidden("forbidden".to_string()))
        }
    }

    /// Idempotent: granting an existing (role, ability) pair is a no-op.
    pub async fn grant(&self, role: Role, ability: Ability) -> Result<()> {
        sqlx::query(
            "INSERT INTO role_abilities (role, ability) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(role.as_str())
        .bind(ability.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns whether a row was actually removed (UI feedback); revoking
    /// something never granted is not an error.
    pub async fn revoke(&self, role: Role, ability: Ability) -> Result<bool> {
        let res = sqlx::query("DELETE FROM role_abilities WHERE role = $1 AND ability = $2")
            .bind(role.as_str())
            .bind(ability.as_str())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Every known role with its ability list, for the admin permissions
    /// editor. Admin is shown with the full catalog since it bypasses the
    /// table.
    pub async fn list_all(&self) -> Result<Vec<RoleGrants>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT role, ability FROM role_abilities ORDER BY role, ability")
                .fetch_all(&self.pool)
                .await?;

        let mut by_role: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for role in Role::ALL {
            by_role.insert(role.as_str(), Vec::new());
        }
        for (role, ability) in &rows {
            if let (Some(role), Some(ability)) = (Role::parse(role), Ability::parse(ability)) {
                if !role.is_admin() {
                    by_role
                        .entry(role.as_str())
                        .or_default()
                        .push(ability.as_str().to_string());
                }
            }
        }
        by_role.insert(
            Role::Admin.as_str(),
            Ability::ALL.iter().map(|a| a.as_str().to_string()).collect(),
        );

        Ok(by_role
            .into_iter()
            .map(|(role, abilities)| RoleGrants {
                role: role.to_string(),
                abilities,
            })
            .collect())
    }
}
