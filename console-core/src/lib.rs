//! Management-console backend core: dictionary caching and login lockout
//! over a shared TTL key-value cache store, with database mapper seams.

pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod dict;
pub mod mapper;

// Re-export commonly used types
pub use auth::{AuthService, BcryptVerifier, PasswordService, PasswordVerifier, SysUser};
pub use config::{AppConfig, PasswordPolicy};
pub use core::{CacheStore, ConsoleError, Result, StoreConfig, StoreStats};
pub use dict::{
    DictCache, DictDataQuery, DictDataService, DictTypeQuery, DictTypeService, SysDictData,
    SysDictType,
};
pub use mapper::{DictDataMapper, DictTypeMapper, UserMapper};
