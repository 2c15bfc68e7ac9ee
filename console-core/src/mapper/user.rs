use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::user::SysUser;
use crate::constants::DEL_FLAG_DELETED;
use crate::core::Result;

/// User rows collaborator
#[async_trait]
pub trait UserMapper: Send + Sync {
    /// Select a user by login name, excluding soft-deleted rows
    async fn select_user_by_user_name(&self, user_name: &str) -> Result<Option<SysUser>>;

    /// Record the last successful login
    async fn update_login_info(&self, user_id: i64, login_ip: &str) -> Result<u64>;
}

/// Postgres-backed user mapper
#[derive(Clone)]
pub struct PgUserMapper {
    pool: PgPool,
}

impl PgUserMapper {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserMapper for PgUserMapper {
    async fn select_user_by_user_name(&self, user_name: &str) -> Result<Option<SysUser>> {
        let row = sqlx::query_as::<_, SysUser>(
            "SELECT user_id, dept_id, user_name, nick_name, email, phonenumber, \
             password, status, del_flag, login_ip, login_date, create_time \
             FROM sys_user WHERE user_name = $1 AND del_flag <> $2",
        )
        .bind(user_name)
        .bind(DEL_FLAG_DELETED)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_login_info(&self, user_id: i64, login_ip: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE sys_user SET login_ip = $1, login_date = NOW() WHERE user_id = $2",
        )
        .bind(login_ip)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
