//! Shared in-memory collaborator doubles for the integration suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use console_core::auth::PasswordVerifier;
use console_core::{
    DictDataMapper, DictDataQuery, DictTypeMapper, DictTypeQuery, Result, SysDictData,
    SysDictType, SysUser, UserMapper,
};

/// In-memory dictionary data rows. List results come back in insertion
/// order, so the cache's own sorting is what the assertions exercise.
#[derive(Default)]
pub struct MemoryDictDataMapper {
    pub rows: Mutex<Vec<SysDictData>>,
    pub by_type_calls: AtomicUsize,
}

impl MemoryDictDataMapper {
    pub fn with_rows(rows: Vec<SysDictData>) -> Self {
        Self {
            rows: Mutex::new(rows),
            by_type_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DictDataMapper for MemoryDictDataMapper {
    async fn select_dict_data_list(&self, query: &DictDataQuery) -> Result<Vec<SysDictData>> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|r| query.status.as_deref().is_none_or(|s| r.status == s))
            .filter(|r| query.dict_type.as_deref().is_none_or(|t| r.dict_type == t))
            .cloned()
            .collect())
    }

    async fn select_dict_data_by_type(&self, dict_type: &str) -> Result<Vec<SysDictData>> {
        self.by_type_calls.fetch_add(1, Ordering::SeqCst);
        let mut matched: Vec<SysDictData> = self
            .rows
            .lock()
            .iter()
            .filter(|r| r.dict_type == dict_type && r.status == "0")
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.dict_sort);
        Ok(matched)
    }

    async fn count_dict_data_by_type(&self, dict_type: &str) -> Result<i64> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| r.dict_type == dict_type)
            .count() as i64)
    }

    async fn select_dict_data_by_code(&self, dict_code: i64) -> Result<Option<SysDictData>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|r| r.dict_code == dict_code)
            .cloned())
    }

    async fn insert_dict_data(&self, data: &SysDictData) -> Result<u64> {
        self.rows.lock().push(data.clone());
        Ok(1)
    }

    async fn update_dict_data(&self, data: &SysDictData) -> Result<u64> {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|r| r.dict_code == data.dict_code) {
            Some(row) => {
                *row = data.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_dict_data_by_code(&self, dict_code: i64) -> Result<u64> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.dict_code != dict_code);
        Ok((before - rows.len()) as u64)
    }

    async fn update_dict_data_type(&self, old_type: &str, new_type: &str) -> Result<u64> {
        let mut rows = self.rows.lock();
        let mut changed = 0;
        for row in rows.iter_mut().filter(|r| r.dict_type == old_type) {
            row.dict_type = new_type.to_string();
            changed += 1;
        }
        Ok(changed)
    }
}

/// In-memory dictionary type rows
#[derive(Default)]
pub struct MemoryDictTypeMapper {
    pub rows: Mutex<Vec<SysDictType>>,
}

impl MemoryDictTypeMapper {
    pub fn with_rows(rows: Vec<SysDictType>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait]
impl DictTypeMapper for MemoryDictTypeMapper {
    async fn select_dict_type_list(&self, query: &DictTypeQuery) -> Result<Vec<SysDictType>> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|r| query.status.as_deref().is_none_or(|s| r.status == s))
            .filter(|r| {
                query
                    .dict_type
                    .as_deref()
                    .is_none_or(|t| r.dict_type.contains(t))
            })
            .filter(|r| {
                query
                    .dict_name
                    .as_deref()
                    .is_none_or(|n| r.dict_name.contains(n))
            })
            .cloned()
            .collect())
    }

    async fn select_dict_type_all(&self) -> Result<Vec<SysDictType>> {
        Ok(self.rows.lock().clone())
    }

    async fn select_dict_type_by_id(&self, dict_id: i64) -> Result<Option<SysDictType>> {
        Ok(self.rows.lock().iter().find(|r| r.dict_id == dict_id).cloned())
    }

    async fn select_dict_type_by_type(&self, dict_type: &str) -> Result<Option<SysDictType>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|r| r.dict_type == dict_type)
            .cloned())
    }

    async fn insert_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        self.rows.lock().push(dict_type.clone());
        Ok(1)
    }

    async fn update_dict_type(&self, dict_type: &SysDictType) -> Result<u64> {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|r| r.dict_id == dict_type.dict_id) {
            Some(row) => {
                *row = dict_type.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_dict_type_by_id(&self, dict_id: i64) -> Result<u64> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r.dict_id != dict_id);
        Ok((before - rows.len()) as u64)
    }
}

/// In-memory user rows
#[derive(Default)]
pub struct MemoryUserMapper {
    pub users: Mutex<Vec<SysUser>>,
}

impl MemoryUserMapper {
    pub fn with_users(users: Vec<SysUser>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserMapper for MemoryUserMapper {
    async fn select_user_by_user_name(&self, user_name: &str) -> Result<Option<SysUser>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|u| u.user_name == user_name && u.del_flag != "2")
            .cloned())
    }

    async fn update_login_info(&self, user_id: i64, login_ip: &str) -> Result<u64> {
        let mut users = self.users.lock();
        match users.iter_mut().find(|u| u.user_id == user_id) {
            Some(user) => {
                user.login_ip = Some(login_ip.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Password comparator double that counts invocations. Lockout tests assert
/// the comparator is never reached once the account is soft-locked.
pub struct CountingVerifier {
    pub calls: AtomicUsize,
    pub matches: bool,
}

impl CountingVerifier {
    pub fn new(matches: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            matches,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PasswordVerifier for CountingVerifier {
    fn verify(&self, _raw_password: &str, _password_hash: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.matches
    }
}

/// Dictionary data row builder
pub fn dict_row(
    code: i64,
    sort: i32,
    dict_type: &str,
    value: &str,
    label: &str,
    status: &str,
) -> SysDictData {
    SysDictData {
        dict_code: code,
        dict_sort: sort,
        dict_label: label.to_string(),
        dict_value: value.to_string(),
        dict_type: dict_type.to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

/// Dictionary type row builder
pub fn type_row(id: i64, name: &str, dict_type: &str) -> SysDictType {
    SysDictType {
        dict_id: id,
        dict_name: name.to_string(),
        dict_type: dict_type.to_string(),
        status: "0".to_string(),
        ..Default::default()
    }
}
