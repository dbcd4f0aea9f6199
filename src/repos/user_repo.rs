/*
 * Responsibility
 * - Read-only access to users / roles / permissions
 * - `UserStore` is the seam the auth gate depends on; `PgUserRepo` is the SQLx implementation
 * - DB errors surface as RepoError so callers can tell a fault from an absent row
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

/// Base user record. `role` is the column on `users`; the effective role may come from
/// `user_roles` instead (see `UserStore::find_role`).
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub role: String,
}

#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Active user by primary id. Disabled users are `Ok(None)`.
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>>;

    /// Highest-priority role assigned through `user_roles`, if any.
    async fn find_role(&self, id: i64) -> RepoResult<Option<String>>;

    /// Whether any of the user's roles grants the enabled permission `code`.
    async fn has_permission(&self, id: i64, code: &str) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, real_name, phone, status, role
            FROM users
            WHERE id = $1 AND status = 'active'
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(row)
    }

    async fn find_role(&self, id: i64) -> RepoResult<Option<String>> {
        let role = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.code
            FROM user_roles ur
            INNER JOIN roles r ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY
                CASE r.code
                    WHEN 'super_admin' THEN 1
                    WHEN 'admin' THEN 2
                    WHEN 'principal' THEN 3
                    ELSE 4
                END,
                r.id
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(role)
    }

    async fn has_permission(&self, id: i64, code: &str) -> RepoResult<bool> {
        let granted = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM role_permissions rp
                INNER JOIN permissions p ON rp.permission_id = p.id
                INNER JOIN user_roles ur ON rp.role_id = ur.role_id
                WHERE ur.user_id = $1 AND p.code = $2 AND p.status = 1
            )
            "#,
        )
        .bind(id)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(granted)
    }
}
