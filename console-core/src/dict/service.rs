use std::sync::Arc;

use tracing::{debug, info};

use super::cache::DictCache;
use super::model::{DictDataQuery, DictTypeQuery, SysDictData, SysDictType};
use crate::core::{ConsoleError, Result};
use crate::mapper::{DictDataMapper, DictTypeMapper};

/// Dictionary type service: CRUD over `sys_dict_type` with cache maintenance
/// on every write path.
#[derive(Clone)]
pub struct DictTypeService {
    type_mapper: Arc<dyn DictTypeMapper>,
    data_mapper: Arc<dyn DictDataMapper>,
    cache: DictCache,
}

impl DictTypeService {
    pub fn new(
        type_mapper: Arc<dyn DictTypeMapper>,
        data_mapper: Arc<dyn DictDataMapper>,
        cache: DictCache,
    ) -> Self {
        Self {
            type_mapper,
            data_mapper,
            cache,
        }
    }

    pub async fn select_dict_type_list(&self, query: &DictTypeQuery) -> Result<Vec<SysDictType>> {
        self.type_mapper.select_dict_type_list(query).await
    }

    pub async fn select_dict_type_all(&self) -> Result<Vec<SysDictType>> {
        self.type_mapper.select_dict_type_all().await
    }

    pub async fn select_dict_type_by_id(&self, dict_id: i64) -> Result<Option<SysDictType>> {
        self.type_mapper.select_dict_type_by_id(dict_id).await
    }

    pub async fn select_dict_type_by_type(&self, dict_type: &str) -> Result<Option<SysDictType>> {
        self.type_mapper.select_dict_type_by_type(dict_type).await
    }

    /// A type string is unique when no other row (different dict_id) uses it
    pub async fn check_dict_type_unique(&self, dict_type: &SysDictType) -> Result<bool> {
        let existing = self
            .type_mapper
            .select_dict_type_by_type(&dict_type.dict_type)
            .await?;
        Ok(match existing {
            Some(row) => row.dict_id == dict_type.dict_id,
            None => true,
        })
    }

    /// Insert a new type. On success the type gets an empty cache entry so
    /// lookups against it resolve to an empty list rather than a miss.
    pub async fn insert_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        if !self.check_dict_type_unique(dict_type).await? {
            return Err(ConsoleError::DictTypeNotUnique(dict_type.dict_type.clone()));
        }

        let rows = self.type_mapper.insert_dict_type(dict_type).await?;
        if rows > 0 {
            self.cache.set_dict_cache(&dict_type.dict_type, &[]).await?;
        }
        Ok(rows)
    }

    /// Update a type. Renaming the type string re-points its data rows, then
    /// the cache entry for the (new) type is rewritten from the database.
    pub async fn update_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        if !self.check_dict_type_unique(dict_type).await? {
            return Err(ConsoleError::DictTypeNotUnique(dict_type.dict_type.clone()));
        }

        let old = self
            .type_mapper
            .select_dict_type_by_id(dict_type.dict_id)
            .await?
            .ok_or_else(|| {
                ConsoleError::NotFound(format!("dict type id {}", dict_type.dict_id))
            })?;

        let rows = self.type_mapper.update_dict_type(dict_type).await?;

        if old.dict_type != dict_type.dict_type {
            debug!(
                "Dictionary type renamed: {} -> {}",
                old.dict_type, dict_type.dict_type
            );
            self.data_mapper
                .update_dict_data_type(&old.dict_type, &dict_type.dict_type)
                .await?;
            self.cache.remove_dict_cache(&old.dict_type).await;
        }

        if rows > 0 {
            let entries = self
                .data_mapper
                .select_dict_data_by_type(&dict_type.dict_type)
                .await?;
            self.cache
                .set_dict_cache(&dict_type.dict_type, &entries)
                .await?;
        }
        Ok(rows)
    }

    /// Delete types by id. Types that still have data assigned are refused;
    /// ids that no longer exist are skipped. Returns the number actually
    /// deleted.
    pub async fn delete_dict_type_by_ids(&self, dict_ids: &[i64]) -> Result<u64> {
        let mut deleted = 0;

        for &dict_id in dict_ids {
            let Some(dict_type) = self.type_mapper.select_dict_type_by_id(dict_id).await? else {
                continue;
            };

            let assigned = self
                .data_mapper
                .count_dict_data_by_type(&dict_type.dict_type)
                .await?;
            if assigned > 0 {
                return Err(ConsoleError::DictTypeAssigned(dict_type.dict_name));
            }

            self.type_mapper.delete_dict_type_by_id(dict_id).await?;
            self.cache.remove_dict_cache(&dict_type.dict_type).await;
            deleted += 1;
        }

        Ok(deleted)
    }

    /// Load the whole dictionary cache from the database
    pub async fn loading_dict_cache(&self) -> Result<()> {
        self.cache.load(self.data_mapper.as_ref()).await
    }

    /// Clear and reload the whole dictionary cache
    pub async fn reset_dict_cache(&self) -> Result<()> {
        info!("Resetting dictionary cache");
        self.cache.reset(self.data_mapper.as_ref()).await
    }
}

/// Dictionary data service: read-through lookups plus CRUD that keeps the
/// per-type cache entry in sync.
#[derive(Clone)]
pub struct DictDataService {
    data_mapper: Arc<dyn DictDataMapper>,
    cache: DictCache,
}

impl DictDataService {
    pub fn new(data_mapper: Arc<dyn DictDataMapper>, cache: DictCache) -> Self {
        Self { data_mapper, cache }
    }

    pub async fn select_dict_data_list(&self, query: &DictDataQuery) -> Result<Vec<SysDictData>> {
        self.data_mapper.select_dict_data_list(query).await
    }

    pub async fn select_dict_data_by_code(&self, dict_code: i64) -> Result<Option<SysDictData>> {
        self.data_mapper.select_dict_data_by_code(dict_code).await
    }

    /// Read-through lookup: cache first, otherwise the database, populating
    /// the cache on the way out
    pub async fn select_dict_data_by_type(&self, dict_type: &str) -> Result<Vec<SysDictData>> {
        if let Some(entries) = self.cache.get_dict_cache(dict_type).await {
            return Ok(entries);
        }

        let entries = self.data_mapper.select_dict_data_by_type(dict_type).await?;
        if !entries.is_empty() {
            self.cache.set_dict_cache(dict_type, &entries).await?;
        }
        Ok(entries)
    }

    pub async fn insert_dict_data(&self, data: &SysDictData) -> Result<u64> {
        let rows = self.data_mapper.insert_dict_data(data).await?;
        if rows > 0 {
            self.refresh_cache(&data.dict_type).await?;
        }
        Ok(rows)
    }

    pub async fn update_dict_data(&self, data: &SysDictData) -> Result<u64> {
        let rows = self.data_mapper.update_dict_data(data).await?;
        if rows > 0 {
            self.refresh_cache(&data.dict_type).await?;
        }
        Ok(rows)
    }

    /// Delete rows by dict_code, rewriting each affected type's cache entry
    pub async fn delete_dict_data_by_codes(&self, dict_codes: &[i64]) -> Result<u64> {
        let mut deleted = 0;

        for &dict_code in dict_codes {
            let Some(data) = self.data_mapper.select_dict_data_by_code(dict_code).await? else {
                continue;
            };

            deleted += self.data_mapper.delete_dict_data_by_code(dict_code).await?;
            self.refresh_cache(&data.dict_type).await?;
        }

        Ok(deleted)
    }

    /// Rewrite one type's cache entry from the database
    async fn refresh_cache(&self, dict_type: &str) -> Result<()> {
        let entries = self.data_mapper.select_dict_data_by_type(dict_type).await?;
        self.cache.set_dict_cache(dict_type, &entries).await
    }
}
