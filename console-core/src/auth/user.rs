use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::{DEL_FLAG_DELETED, STATUS_DISABLED};

/// User account row
/// Maps to `sys_user`
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SysUser {
    pub user_id: i64,
    pub dept_id: Option<i64>,
    pub user_name: String,
    pub nick_name: String,
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password: String,
    /// "0" normal, "1" disabled
    pub status: String,
    /// "0" present, "2" soft-deleted
    pub del_flag: String,
    pub login_ip: Option<String>,
    pub login_date: Option<NaiveDateTime>,
    pub create_time: Option<NaiveDateTime>,
}

impl SysUser {
    /// Account disabled by the administrator
    pub fn is_disabled(&self) -> bool {
        self.status == STATUS_DISABLED
    }

    /// Account soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.del_flag == DEL_FLAG_DELETED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = SysUser {
            user_name: "admin".to_string(),
            password: "$2b$12$secret".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_status_flags() {
        let mut user = SysUser::default();
        assert!(!user.is_disabled());
        assert!(!user.is_deleted());

        user.status = "1".to_string();
        user.del_flag = "2".to_string();
        assert!(user.is_disabled());
        assert!(user.is_deleted());
    }
}
