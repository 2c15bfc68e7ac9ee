use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::Result;
use crate::dict::model::{DictTypeQuery, SysDictType};

const DICT_TYPE_COLUMNS: &str = "dict_id, dict_name, dict_type, status, remark, \
     create_by, create_time, update_by, update_time";

/// Dictionary type rows collaborator
#[async_trait]
pub trait DictTypeMapper: Send + Sync {
    /// Select dictionary types with optional filters
    async fn select_dict_type_list(&self, query: &DictTypeQuery) -> Result<Vec<SysDictType>>;

    /// Select every dictionary type
    async fn select_dict_type_all(&self) -> Result<Vec<SysDictType>>;

    /// Select one type by id
    async fn select_dict_type_by_id(&self, dict_id: i64) -> Result<Option<SysDictType>>;

    /// Select one type by its type string
    async fn select_dict_type_by_type(&self, dict_type: &str) -> Result<Option<SysDictType>>;

    /// Insert a row, returning affected rows
    async fn insert_dict_type(&self, dict_type: &SysDictType) -> Result<u64>;

    /// Update a row by dict_id, returning affected rows
    async fn update_dict_type(&self, dict_type: &SysDictType) -> Result<u64>;

    /// Delete a row by dict_id, returning affected rows
    async fn delete_dict_type_by_id(&self, dict_id: i64) -> Result<u64>;
}

/// Postgres-backed dictionary type mapper
#[derive(Clone)]
pub struct PgDictTypeMapper {
    pool: PgPool,
}

impl PgDictTypeMapper {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DictTypeMapper for PgDictTypeMapper {
    async fn select_dict_type_list(&self, query: &DictTypeQuery) -> Result<Vec<SysDictType>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {DICT_TYPE_COLUMNS} FROM sys_dict_type WHERE 1 = 1"
        ));

        if let Some(dict_name) = &query.dict_name {
            builder
                .push(" AND dict_name LIKE ")
                .push_bind(format!("%{dict_name}%"));
        }
        if let Some(dict_type) = &query.dict_type {
            builder
                .push(" AND dict_type LIKE ")
                .push_bind(format!("%{dict_type}%"));
        }
        if let Some(status) = &query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        builder.push(" ORDER BY dict_id ASC");

        let rows = builder
            .build_query_as::<SysDictType>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn select_dict_type_all(&self) -> Result<Vec<SysDictType>> {
        let sql = format!("SELECT {DICT_TYPE_COLUMNS} FROM sys_dict_type ORDER BY dict_id ASC");
        let rows = sqlx::query_as::<_, SysDictType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn select_dict_type_by_id(&self, dict_id: i64) -> Result<Option<SysDictType>> {
        let sql = format!("SELECT {DICT_TYPE_COLUMNS} FROM sys_dict_type WHERE dict_id = $1");
        let row = sqlx::query_as::<_, SysDictType>(&sql)
            .bind(dict_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn select_dict_type_by_type(&self, dict_type: &str) -> Result<Option<SysDictType>> {
        let sql = format!("SELECT {DICT_TYPE_COLUMNS} FROM sys_dict_type WHERE dict_type = $1");
        let row = sqlx::query_as::<_, SysDictType>(&sql)
            .bind(dict_type)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO sys_dict_type \
             (dict_name, dict_type, status, remark, create_by, create_time) \
             VALUES ($1, $2, $3, $4, $5, NOW())",
        )
        .bind(&dict_type.dict_name)
        .bind(&dict_type.dict_type)
        .bind(&dict_type.status)
        .bind(&dict_type.remark)
        .bind(&dict_type.create_by)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE sys_dict_type SET \
             dict_name = $1, dict_type = $2, status = $3, remark = $4, \
             update_by = $5, update_time = NOW() \
             WHERE dict_id = $6",
        )
        .bind(&dict_type.dict_name)
        .bind(&dict_type.dict_type)
        .bind(&dict_type.status)
        .bind(&dict_type.remark)
        .bind(&dict_type.update_by)
        .bind(dict_type.dict_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_dict_type_by_id(&self, dict_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sys_dict_type WHERE dict_id = $1")
            .bind(dict_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
