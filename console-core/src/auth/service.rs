use std::sync::Arc;

use tracing::{debug, info};

use super::password::PasswordService;
use super::user::SysUser;
use crate::core::{ConsoleError, Result};
use crate::mapper::UserMapper;

/// Login service over the user mapper and the password lockout service.
#[derive(Clone)]
pub struct AuthService {
    user_mapper: Arc<dyn UserMapper>,
    password_service: PasswordService,
}

impl AuthService {
    pub fn new(user_mapper: Arc<dyn UserMapper>, password_service: PasswordService) -> Self {
        Self {
            user_mapper,
            password_service,
        }
    }

    /// Authenticate a login attempt.
    ///
    /// Unknown and deleted users fail with the same generic credential error
    /// as a wrong password; only a disabled account is reported as such.
    pub async fn login(
        &self,
        user_name: &str,
        raw_password: &str,
        login_ip: &str,
    ) -> Result<SysUser> {
        debug!("Login attempt for '{}' from {}", user_name, login_ip);

        let user = self
            .user_mapper
            .select_user_by_user_name(user_name)
            .await?
            .ok_or(ConsoleError::InvalidCredentials)?;

        if user.is_deleted() {
            return Err(ConsoleError::InvalidCredentials);
        }
        if user.is_disabled() {
            return Err(ConsoleError::AccountDisabled);
        }

        self.password_service.validate(&user, raw_password).await?;

        self.user_mapper
            .update_login_info(user.user_id, login_ip)
            .await?;

        info!("Login succeeded for '{}'", user_name);
        Ok(user)
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}
