mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{MemoryDictDataMapper, MemoryDictTypeMapper, dict_row, type_row};
use console_core::{
    CacheStore, ConsoleError, DictCache, DictDataService, DictTypeService, StoreConfig,
    SysDictType,
};

struct Fixture {
    cache: DictCache,
    type_mapper: Arc<MemoryDictTypeMapper>,
    data_mapper: Arc<MemoryDictDataMapper>,
    type_service: DictTypeService,
    data_service: DictDataService,
}

fn fixture(types: Vec<SysDictType>, data: Vec<console_core::SysDictData>) -> Fixture {
    let store = Arc::new(CacheStore::new(StoreConfig::default()));
    let cache = DictCache::new(store);
    let type_mapper = Arc::new(MemoryDictTypeMapper::with_rows(types));
    let data_mapper = Arc::new(MemoryDictDataMapper::with_rows(data));

    let type_service = DictTypeService::new(
        type_mapper.clone(),
        data_mapper.clone(),
        cache.clone(),
    );
    let data_service = DictDataService::new(data_mapper.clone(), cache.clone());

    Fixture {
        cache,
        type_mapper,
        data_mapper,
        type_service,
        data_service,
    }
}

#[tokio::test]
async fn test_insert_type_seeds_empty_cache_entry() {
    let fx = fixture(vec![], vec![]);

    fx.type_service
        .insert_dict_type(&type_row(1, "User sex", "sys_user_sex"))
        .await
        .unwrap();

    // Empty list, not a miss
    assert_eq!(fx.cache.get_dict_cache("sys_user_sex").await, Some(vec![]));
}

#[tokio::test]
async fn test_insert_duplicate_type_is_rejected() {
    let fx = fixture(vec![type_row(1, "User sex", "sys_user_sex")], vec![]);

    let err = fx
        .type_service
        .insert_dict_type(&type_row(2, "Sex again", "sys_user_sex"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::DictTypeNotUnique(_)));
}

#[tokio::test]
async fn test_delete_refuses_type_with_assigned_data() {
    let fx = fixture(
        vec![type_row(1, "User sex", "sys_user_sex")],
        vec![dict_row(1, 1, "sys_user_sex", "0", "Male", "0")],
    );

    let err = fx.type_service.delete_dict_type_by_ids(&[1]).await.unwrap_err();
    match err {
        ConsoleError::DictTypeAssigned(name) => assert_eq!(name, "User sex"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Still present
    assert!(fx.type_mapper.rows.lock().iter().any(|r| r.dict_id == 1));
}

#[tokio::test]
async fn test_delete_removes_type_and_cache_entry_and_skips_missing_ids() {
    let fx = fixture(vec![type_row(1, "Job status", "sys_job_status")], vec![]);
    fx.cache.set_dict_cache("sys_job_status", &[]).await.unwrap();

    let deleted = fx.type_service.delete_dict_type_by_ids(&[1, 99]).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(fx.cache.get_dict_cache("sys_job_status").await, None);
}

#[tokio::test]
async fn test_update_rename_repoints_data_and_rewrites_cache() {
    let fx = fixture(
        vec![type_row(1, "Job status", "sys_job_status")],
        vec![
            dict_row(1, 2, "sys_job_status", "1", "Running", "0"),
            dict_row(2, 1, "sys_job_status", "0", "Normal", "0"),
        ],
    );
    fx.cache
        .set_dict_cache("sys_job_status", &[])
        .await
        .unwrap();

    let mut renamed = type_row(1, "Job status", "sys_job_state");
    renamed.update_by = Some("admin".to_string());
    fx.type_service.update_dict_type(&renamed).await.unwrap();

    // Data rows follow the rename
    assert!(
        fx.data_mapper
            .rows
            .lock()
            .iter()
            .all(|r| r.dict_type == "sys_job_state")
    );

    // Old cache entry dropped, new one holds the rows sorted by dict_sort
    assert_eq!(fx.cache.get_dict_cache("sys_job_status").await, None);
    let entries = fx.cache.get_dict_cache("sys_job_state").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].dict_label, "Normal");
}

#[tokio::test]
async fn test_select_by_type_is_read_through() {
    let fx = fixture(
        vec![],
        vec![dict_row(1, 1, "sys_user_sex", "0", "Male", "0")],
    );

    let first = fx.data_service.select_dict_data_by_type("sys_user_sex").await.unwrap();
    assert_eq!(first.len(), 1);

    let second = fx.data_service.select_dict_data_by_type("sys_user_sex").await.unwrap();
    assert_eq!(second, first);

    // Second call was served from the cache
    assert_eq!(fx.data_mapper.by_type_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_data_mutations_rewrite_cache_entry() {
    let fx = fixture(vec![], vec![]);

    fx.data_service
        .insert_dict_data(&dict_row(1, 1, "sys_user_sex", "0", "Male", "0"))
        .await
        .unwrap();
    assert_eq!(fx.cache.get_dict_cache("sys_user_sex").await.unwrap().len(), 1);

    let mut updated = dict_row(1, 1, "sys_user_sex", "0", "M", "0");
    updated.update_by = Some("admin".to_string());
    fx.data_service.update_dict_data(&updated).await.unwrap();
    assert_eq!(
        fx.cache.get_dict_cache("sys_user_sex").await.unwrap()[0].dict_label,
        "M"
    );

    fx.data_service.delete_dict_data_by_codes(&[1]).await.unwrap();
    assert_eq!(fx.cache.get_dict_cache("sys_user_sex").await, Some(vec![]));
}
