//! # User Repository
//!
//! Access to the `usuarios` table. The interesting operation is
//! [`UserRepository::ensure_owner`]: first boot on an empty database
//! creates the one owner account, so a fresh install can always log in
//! and create everyone else. Running it again is a no-op.

use sqlx::SqlitePool;
use tracing::{debug, info};

use caja_core::{Role, User};

use crate::error::{DbError, DbResult};
use crate::repository::new_id;

/// Display name for the bootstrapped owner account.
pub const DEFAULT_OWNER_NAME: &str = "Owner";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    role: String,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> DbResult<User> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| DbError::invalid_data(format!("unknown role {:?}", row.role)))?;
        Ok(User {
            id: row.id,
            name: row.name,
            role,
            is_active: row.is_active,
        })
    }
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates the initial owner account if no users exist yet.
    pub async fn ensure_owner(&self) -> DbResult<()> {
        if self.count().await? > 0 {
            return Ok(());
        }
        let owner = self.insert(DEFAULT_OWNER_NAME, Role::Owner, true).await?;
        info!(id = %owner.id, name = %owner.name, "bootstrapped owner account");
        Ok(())
    }

    /// Inserts a user with a fresh id.
    pub async fn insert(&self, name: &str, role: Role, is_active: bool) -> DbResult<User> {
        let user = User {
            id: new_id(),
            name: name.to_string(),
            role,
            is_active,
        };
        sqlx::query("INSERT INTO usuarios (id, nombre, rol, activo) VALUES (?1, ?2, ?3, ?4)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .execute(&self.pool)
            .await?;
        debug!(id = %user.id, role = %user.role, "inserted user");
        Ok(user)
    }

    /// Looks a user up by display name (names are unique).
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, nombre AS name, rol AS role, activo AS is_active \
             FROM usuarios WHERE nombre = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn insert_and_get_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let maria = users.insert("Maria", Role::Operator, true).await.unwrap();
        let found = users.get_by_name("Maria").await.unwrap().unwrap();
        assert_eq!(found, maria);
        assert_eq!(found.role, Role::Operator);
        assert!(found.is_active);
    }

    #[tokio::test]
    async fn get_by_name_returns_none_for_unknown() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.users().get_by_name("Nadie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.insert("Maria", Role::Operator, true).await.unwrap();
        let err = users.insert("Maria", Role::Operator, true).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn bootstrapped_owner_has_owner_role() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db
            .users()
            .get_by_name(DEFAULT_OWNER_NAME)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner.role, Role::Owner);
        assert!(owner.is_active);
    }
}
