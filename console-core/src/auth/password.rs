use std::sync::Arc;

use bcrypt::{DEFAULT_COST, hash, verify};
use serde::Serialize;
use tracing::{debug, warn};

use super::user::SysUser;
use crate::config::PasswordPolicy;
use crate::constants::PWD_ERR_CNT_KEY;
use crate::core::{CacheStore, ConsoleError, Result};

/// Password comparison seam. Production uses bcrypt; tests inject counting
/// doubles to assert the lockout short-circuit never reaches the comparator.
pub trait PasswordVerifier: Send + Sync {
    /// Compare a raw password against a stored hash
    fn verify(&self, raw_password: &str, password_hash: &str) -> bool;
}

/// Bcrypt-backed verifier; a malformed hash counts as a mismatch
#[derive(Debug, Clone, Default)]
pub struct BcryptVerifier;

impl PasswordVerifier for BcryptVerifier {
    fn verify(&self, raw_password: &str, password_hash: &str) -> bool {
        verify(raw_password, password_hash).unwrap_or(false)
    }
}

/// Hash a password for storage (bcrypt, default cost)
pub fn hash_password(raw_password: &str) -> Result<String> {
    hash(raw_password, DEFAULT_COST)
        .map_err(|e| ConsoleError::InternalError(format!("Failed to hash password: {e}")))
}

/// Outcome of recording one failed login
#[derive(Debug, Clone, Serialize)]
pub struct LoginFailRecord {
    pub retry_count: u32,
    pub max_retry_count: u32,
    /// Lock duration in minutes
    pub lock_time: u64,
}

/// Login password lockout service.
///
/// Failure counters live in the cache store under `pwd_err_cnt:<user_name>`
/// with a sliding TTL: every failure rewrites the counter with the full lock
/// duration. The read-increment-write sequence is not serialized across
/// concurrent attempts; overlapping failures may under-count.
#[derive(Clone)]
pub struct PasswordService {
    store: Arc<CacheStore>,
    verifier: Arc<dyn PasswordVerifier>,
    policy: PasswordPolicy,
}

impl PasswordService {
    pub fn new(
        store: Arc<CacheStore>,
        verifier: Arc<dyn PasswordVerifier>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            store,
            verifier,
            policy,
        }
    }

    /// Bcrypt-backed service with the given policy
    pub fn with_bcrypt(store: Arc<CacheStore>, policy: PasswordPolicy) -> Self {
        Self::new(store, Arc::new(BcryptVerifier), policy)
    }

    /// Build the counter key for a user
    pub fn cache_key(user_name: &str) -> String {
        format!("{PWD_ERR_CNT_KEY}{user_name}")
    }

    /// Validate a login password against the lockout policy.
    ///
    /// At or above the retry threshold the account is soft-locked for the
    /// remaining TTL window and the password is not compared at all. A
    /// mismatch increments the counter and resets its TTL to the full lock
    /// duration; a match clears the counter.
    pub async fn validate(&self, user: &SysUser, raw_password: &str) -> Result<()> {
        let user_name = &user.user_name;
        let retry_count = self.retry_count(user_name).await;

        if retry_count >= self.policy.max_retry_count {
            warn!(
                "Login locked for '{}': {} failed attempts",
                user_name, retry_count
            );
            return Err(ConsoleError::RetryLimitExceeded {
                max_retry_count: self.policy.max_retry_count,
                lock_time: self.policy.lock_time,
            });
        }

        if !self.verifier.verify(raw_password, &user.password) {
            self.record_login_fail(user_name).await;
            return Err(ConsoleError::InvalidCredentials);
        }

        self.clear_login_record(user_name).await;
        Ok(())
    }

    /// Plain password comparison without lockout bookkeeping
    pub fn matches(&self, user: &SysUser, raw_password: &str) -> bool {
        self.verifier.verify(raw_password, &user.password)
    }

    /// Drop a user's failure counter if present
    pub async fn clear_login_record(&self, user_name: &str) {
        let key = Self::cache_key(user_name);
        if self.store.get(&key).await.is_some() {
            self.store.delete(&key).await;
        }
    }

    /// Record one failed login: counter + 1, TTL reset to the full lock
    /// duration
    pub async fn record_login_fail(&self, user_name: &str) -> LoginFailRecord {
        let retry_count = self.retry_count(user_name).await + 1;

        debug!("Login failure {} for '{}'", retry_count, user_name);
        self.store
            .set(
                &Self::cache_key(user_name),
                retry_count.to_string(),
                Some(self.policy.lock_time * 60),
            )
            .await;

        LoginFailRecord {
            retry_count,
            max_retry_count: self.policy.max_retry_count,
            lock_time: self.policy.lock_time,
        }
    }

    /// Retries left before the account soft-locks
    pub async fn remaining_retries(&self, user_name: &str) -> u32 {
        self.policy
            .max_retry_count
            .saturating_sub(self.retry_count(user_name).await)
    }

    /// Current counter value; absent or unparseable reads as zero
    async fn retry_count(&self, user_name: &str) -> u32 {
        match self.store.get(&Self::cache_key(user_name)).await {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Unparseable retry counter for '{}': {:?}", user_name, raw);
                0
            }),
            None => 0,
        }
    }
}
