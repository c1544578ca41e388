//! In-memory repositories for tests and local experiments without Postgres

use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use crate::domain::users::{NewUser, User, UserRepository};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use uuid::Uuid;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&self, id: Uuid) {
        lock(&self.users).retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == new_user.email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }
}

/// Refresh token store keyed by record id.
///
/// `fail_writes` / `fail_revokes` let tests simulate an unavailable store.
#[derive(Clone, Default)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<Mutex<HashMap<Uuid, RefreshToken>>>,
    fail_writes: Arc<AtomicBool>,
    fail_revokes: Arc<AtomicBool>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_revokes(&self, fail: bool) {
        self.fail_revokes.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<RefreshToken> {
        lock(&self.tokens).values().cloned().collect()
    }

    pub fn find_by_token(&self, token: &str) -> Option<RefreshToken> {
        lock(&self.tokens).values().find(|t| t.token == token).cloned()
    }

    /// Move a stored token's expiry, e.g. into the past
    pub fn set_expires_at(&self, token: &str, expires_at: OffsetDateTime) {
        if let Some(record) = lock(&self.tokens).values_mut().find(|t| t.token == token) {
            record.expires_at = expires_at;
        }
    }

    /// Insert a record as-is, bypassing the write failure switch
    pub fn insert(&self, record: RefreshToken) {
        lock(&self.tokens).insert(record.id, record);
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("token store unavailable");
        }

        let mut tokens = lock(&self.tokens);
        if tokens
            .values()
            .any(|t| t.token == token.token && t.user_id == token.user_id)
        {
            bail!("duplicate refresh token");
        }

        let now = OffsetDateTime::now_utc();
        let record = RefreshToken {
            id: Uuid::new_v4(),
            user_id: token.user_id,
            token: token.token,
            expires_at: token.expires_at,
            created_at: now,
            updated_at: now,
            revoked: false,
        };
        tokens.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_token_and_user(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> Result<Option<RefreshToken>> {
        Ok(lock(&self.tokens)
            .values()
            .find(|t| t.token == token && t.user_id == user_id)
            .cloned())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64> {
        if self.fail_revokes.load(Ordering::SeqCst) {
            bail!("token store unavailable");
        }

        let now = OffsetDateTime::now_utc();
        let mut count = 0;
        for record in lock(&self.tokens)
            .values_mut()
            .filter(|t| t.user_id == user_id && !t.revoked)
        {
            record.revoked = true;
            record.updated_at = now;
            count += 1;
        }
        Ok(count)
    }

    async fn revoke_by_id(&self, id: Uuid) -> Result<bool> {
        if self.fail_revokes.load(Ordering::SeqCst) {
            bail!("token store unavailable");
        }

        match lock(&self.tokens).get_mut(&id) {
            Some(record) if !record.revoked => {
                record.revoked = true;
                record.updated_at = OffsetDateTime::now_utc();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired(&self, now: OffsetDateTime) -> Result<u64> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("token store unavailable");
        }

        let mut tokens = lock(&self.tokens);
        let before = tokens.len();
        tokens.retain(|_, t| t.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }
}
