//! Database collaborator seams.
//!
//! Services depend on these traits; production wires the Postgres
//! implementations over a shared `PgPool`, tests inject in-memory doubles.

pub mod dict_data;
pub mod dict_type;
pub mod user;

pub use dict_data::{DictDataMapper, PgDictDataMapper};
pub use dict_type::{DictTypeMapper, PgDictTypeMapper};
pub use user::{PgUserMapper, UserMapper};
