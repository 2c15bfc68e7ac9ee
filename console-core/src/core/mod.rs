pub mod error;
pub mod store;
pub mod types;

pub use error::{ConsoleError, Result};
pub use store::CacheStore;
pub use types::{StoreConfig, StoreStats, StoredValue};
