use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::model::{DictDataQuery, SysDictData};
use crate::constants::{DICT_SEPARATOR, STATUS_NORMAL, SYS_DICT_KEY};
use crate::core::{CacheStore, ConsoleError, Result};
use crate::mapper::DictDataMapper;

/// Dictionary cache facade over the shared cache store.
///
/// One cache entry per dictionary type, keyed `sys_dict:<dict_type>`, holding
/// the type's active rows as a JSON array sorted by dict_sort. A corrupt
/// payload is treated as a miss: logged, never surfaced.
#[derive(Clone)]
pub struct DictCache {
    store: Arc<CacheStore>,
}

impl DictCache {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// Build the cache key for a dictionary type
    pub fn cache_key(dict_type: &str) -> String {
        format!("{SYS_DICT_KEY}{dict_type}")
    }

    /// Write one type's entries to the cache (store default TTL)
    pub async fn set_dict_cache(&self, dict_type: &str, entries: &[SysDictData]) -> Result<()> {
        let payload = serde_json::to_string(entries)
            .map_err(|e| ConsoleError::SerializationError(e.to_string()))?;
        self.store.set(&Self::cache_key(dict_type), payload, None).await;
        Ok(())
    }

    /// Read one type's entries; absent or unparseable payloads are `None`
    pub async fn get_dict_cache(&self, dict_type: &str) -> Option<Vec<SysDictData>> {
        let payload = self.store.get(&Self::cache_key(dict_type)).await?;

        match serde_json::from_str(&payload) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("Failed to parse dictionary cache for '{}': {}", dict_type, e);
                None
            }
        }
    }

    /// Drop one type's cache entry
    pub async fn remove_dict_cache(&self, dict_type: &str) -> bool {
        self.store.delete(&Self::cache_key(dict_type)).await
    }

    /// Drop every dictionary cache entry. Keys are enumerated under the
    /// shared prefix and deleted one by one; there is no atomic bulk delete.
    pub async fn clear_dict_cache(&self) -> usize {
        let keys = self.store.keys(SYS_DICT_KEY).await;
        let mut removed = 0;
        for key in keys {
            if self.store.delete(&key).await {
                removed += 1;
            }
        }
        debug!("Cleared {} dictionary cache entries", removed);
        removed
    }

    /// Load every active dictionary row, grouped by type and sorted by
    /// dict_sort ascending, one cache entry per type
    pub async fn load(&self, mapper: &dyn DictDataMapper) -> Result<()> {
        let rows = mapper
            .select_dict_data_list(&DictDataQuery {
                status: Some(STATUS_NORMAL.to_string()),
                ..Default::default()
            })
            .await?;

        let mut grouped: HashMap<String, Vec<SysDictData>> = HashMap::new();
        for row in rows {
            grouped.entry(row.dict_type.clone()).or_default().push(row);
        }

        let types = grouped.len();
        for (dict_type, mut entries) in grouped {
            entries.sort_by_key(|e| e.dict_sort);
            self.set_dict_cache(&dict_type, &entries).await?;
        }

        info!("Dictionary cache loaded ({} types)", types);
        Ok(())
    }

    /// Clear and reload the whole dictionary cache
    pub async fn reset(&self, mapper: &dyn DictDataMapper) -> Result<()> {
        self.clear_dict_cache().await;
        self.load(mapper).await
    }

    /// Resolve dictionary value(s) to label(s). Multi-value inputs are split
    /// on the separator and resolved piece by piece, preserving input order;
    /// unmatched pieces are skipped. Empty string when nothing resolves.
    pub async fn get_dict_label(
        &self,
        dict_type: &str,
        dict_value: &str,
        separator: &str,
    ) -> String {
        if dict_value.is_empty() {
            return String::new();
        }

        let Some(entries) = self.get_dict_cache(dict_type).await else {
            return String::new();
        };
        if entries.is_empty() {
            return String::new();
        }

        if dict_value.contains(separator) {
            dict_value
                .split(separator)
                .filter_map(|value| {
                    entries
                        .iter()
                        .find(|e| e.dict_value == value)
                        .map(|e| e.dict_label.clone())
                })
                .collect::<Vec<_>>()
                .join(separator)
        } else {
            entries
                .iter()
                .find(|e| e.dict_value == dict_value)
                .map(|e| e.dict_label.clone())
                .unwrap_or_default()
        }
    }

    /// Resolve dictionary label(s) back to value(s); mirror of
    /// [`get_dict_label`](Self::get_dict_label)
    pub async fn get_dict_value(
        &self,
        dict_type: &str,
        dict_label: &str,
        separator: &str,
    ) -> String {
        if dict_label.is_empty() {
            return String::new();
        }

        let Some(entries) = self.get_dict_cache(dict_type).await else {
            return String::new();
        };
        if entries.is_empty() {
            return String::new();
        }

        if dict_label.contains(separator) {
            dict_label
                .split(separator)
                .filter_map(|label| {
                    entries
                        .iter()
                        .find(|e| e.dict_label == label)
                        .map(|e| e.dict_value.clone())
                })
                .collect::<Vec<_>>()
                .join(separator)
        } else {
            entries
                .iter()
                .find(|e| e.dict_label == dict_label)
                .map(|e| e.dict_value.clone())
                .unwrap_or_default()
        }
    }

    /// All labels of a type, joined by the default separator
    pub async fn get_dict_labels(&self, dict_type: &str) -> String {
        self.get_dict_cache(dict_type)
            .await
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| e.dict_label.as_str())
                    .collect::<Vec<_>>()
                    .join(DICT_SEPARATOR)
            })
            .unwrap_or_default()
    }

    /// All values of a type, joined by the default separator
    pub async fn get_dict_values(&self, dict_type: &str) -> String {
        self.get_dict_cache(dict_type)
            .await
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| e.dict_value.as_str())
                    .collect::<Vec<_>>()
                    .join(DICT_SEPARATOR)
            })
            .unwrap_or_default()
    }
}
