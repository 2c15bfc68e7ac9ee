use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::constants::STATUS_NORMAL;
use crate::core::Result;
use crate::dict::model::{DictDataQuery, SysDictData};

const DICT_DATA_COLUMNS: &str = "dict_code, dict_sort, dict_label, dict_value, dict_type, \
     css_class, list_class, is_default, status, remark, \
     create_by, create_time, update_by, update_time";

/// Dictionary data rows collaborator
#[async_trait]
pub trait DictDataMapper: Send + Sync {
    /// Select dictionary data with optional filters, ordered by dict_sort
    async fn select_dict_data_list(&self, query: &DictDataQuery) -> Result<Vec<SysDictData>>;

    /// Select active ("0") rows of one type, ordered by dict_sort
    async fn select_dict_data_by_type(&self, dict_type: &str) -> Result<Vec<SysDictData>>;

    /// Count rows assigned to a type
    async fn count_dict_data_by_type(&self, dict_type: &str) -> Result<i64>;

    /// Select one row by dict_code
    async fn select_dict_data_by_code(&self, dict_code: i64) -> Result<Option<SysDictData>>;

    /// Insert a row, returning affected rows
    async fn insert_dict_data(&self, data: &SysDictData) -> Result<u64>;

    /// Update a row by dict_code, returning affected rows
    async fn update_dict_data(&self, data: &SysDictData) -> Result<u64>;

    /// Delete a row by dict_code, returning affected rows
    async fn delete_dict_data_by_code(&self, dict_code: i64) -> Result<u64>;

    /// Re-point rows from a renamed type to the new type name
    async fn update_dict_data_type(&self, old_type: &str, new_type: &str) -> Result<u64>;
}

/// Postgres-backed dictionary data mapper
#[derive(Clone)]
pub struct PgDictDataMapper {
    pool: PgPool,
}

impl PgDictDataMapper {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DictDataMapper for PgDictDataMapper {
    async fn select_dict_data_list(&self, query: &DictDataQuery) -> Result<Vec<SysDictData>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {DICT_DATA_COLUMNS} FROM sys_dict_data WHERE 1 = 1"
        ));

        if let Some(dict_type) = &query.dict_type {
            builder.push(" AND dict_type = ").push_bind(dict_type);
        }
        if let Some(dict_label) = &query.dict_label {
            builder
                .push(" AND dict_label LIKE ")
                .push_bind(format!("%{dict_label}%"));
        }
        if let Some(status) = &query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        builder.push(" ORDER BY dict_sort ASC");

        let rows = builder
            .build_query_as::<SysDictData>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn select_dict_data_by_type(&self, dict_type: &str) -> Result<Vec<SysDictData>> {
        let sql = format!(
            "SELECT {DICT_DATA_COLUMNS} FROM sys_dict_data \
             WHERE status = $1 AND dict_type = $2 ORDER BY dict_sort ASC"
        );
        let rows = sqlx::query_as::<_, SysDictData>(&sql)
            .bind(STATUS_NORMAL)
            .bind(dict_type)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_dict_data_by_type(&self, dict_type: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sys_dict_data WHERE dict_type = $1")
                .bind(dict_type)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn select_dict_data_by_code(&self, dict_code: i64) -> Result<Option<SysDictData>> {
        let sql =
            format!("SELECT {DICT_DATA_COLUMNS} FROM sys_dict_data WHERE dict_code = $1");
        let row = sqlx::query_as::<_, SysDictData>(&sql)
            .bind(dict_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_dict_data(&self, data: &SysDictData) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO sys_dict_data \
             (dict_sort, dict_label, dict_value, dict_type, css_class, list_class, \
              is_default, status, remark, create_by, create_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())",
        )
        .bind(data.dict_sort)
        .bind(&data.dict_label)
        .bind(&data.dict_value)
        .bind(&data.dict_type)
        .bind(&data.css_class)
        .bind(&data.list_class)
        .bind(&data.is_default)
        .bind(&data.status)
        .bind(&data.remark)
        .bind(&data.create_by)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_dict_data(&self, data: &SysDictData) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE sys_dict_data SET \
             dict_sort = $1, dict_label = $2, dict_value = $3, dict_type = $4, \
             css_class = $5, list_class = $6, is_default = $7, status = $8, \
             remark = $9, update_by = $10, update_time = NOW() \
             WHERE dict_code = $11",
        )
        .bind(data.dict_sort)
        .bind(&data.dict_label)
        .bind(&data.dict_value)
        .bind(&data.dict_type)
        .bind(&data.css_class)
        .bind(&data.list_class)
        .bind(&data.is_default)
        .bind(&data.status)
        .bind(&data.remark)
        .bind(&data.update_by)
        .bind(data.dict_code)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_dict_data_by_code(&self, dict_code: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sys_dict_data WHERE dict_code = $1")
            .bind(dict_code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn update_dict_data_type(&self, old_type: &str, new_type: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE sys_dict_data SET dict_type = $1 WHERE dict_type = $2")
            .bind(new_type)
            .bind(old_type)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
