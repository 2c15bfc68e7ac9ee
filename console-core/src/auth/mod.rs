pub mod password;
pub mod service;
pub mod user;

pub use password::{
    BcryptVerifier, LoginFailRecord, PasswordService, PasswordVerifier, hash_password,
};
pub use service::AuthService;
pub use user::SysUser;
