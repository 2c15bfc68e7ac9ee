//! Cache key namespaces and shared status flags

/// Cache key prefix for dictionary entries, one key per dictionary type
pub const SYS_DICT_KEY: &str = "sys_dict:";

/// Cache key prefix for login password failure counters, one key per user
pub const PWD_ERR_CNT_KEY: &str = "pwd_err_cnt:";

/// Default separator for multi-value dictionary fields
pub const DICT_SEPARATOR: &str = ",";

/// Normal (enabled) status flag
pub const STATUS_NORMAL: &str = "0";

/// Disabled status flag
pub const STATUS_DISABLED: &str = "1";

/// Soft-delete flag on user rows
pub const DEL_FLAG_DELETED: &str = "2";
