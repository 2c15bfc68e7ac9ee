use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Dictionary type row
/// Maps to `sys_dict_type`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SysDictType {
    pub dict_id: i64,
    pub dict_name: String,
    pub dict_type: String,
    /// "0" normal, "1" disabled
    pub status: String,
    pub remark: Option<String>,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
}

/// Dictionary data row
/// Maps to `sys_dict_data`; the camelCase serde shape is also the cached
/// JSON payload under `sys_dict:<dict_type>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SysDictData {
    pub dict_code: i64,
    pub dict_sort: i32,
    pub dict_label: String,
    pub dict_value: String,
    pub dict_type: String,
    pub css_class: Option<String>,
    pub list_class: Option<String>,
    /// "Y" when this entry is the type's default choice
    pub is_default: Option<String>,
    /// "0" normal, "1" disabled
    pub status: String,
    pub remark: Option<String>,
    pub create_by: Option<String>,
    pub create_time: Option<NaiveDateTime>,
    pub update_by: Option<String>,
    pub update_time: Option<NaiveDateTime>,
}

/// Filters for dictionary type list queries
#[derive(Debug, Clone, Default)]
pub struct DictTypeQuery {
    pub dict_name: Option<String>,
    pub dict_type: Option<String>,
    pub status: Option<String>,
}

/// Filters for dictionary data list queries
#[derive(Debug, Clone, Default)]
pub struct DictDataQuery {
    pub dict_type: Option<String>,
    pub dict_label: Option<String>,
    pub status: Option<String>,
}
