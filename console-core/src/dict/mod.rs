pub mod cache;
pub mod model;
pub mod service;

pub use cache::DictCache;
pub use model::{DictDataQuery, DictTypeQuery, SysDictData, SysDictType};
pub use service::{DictDataService, DictTypeService};
