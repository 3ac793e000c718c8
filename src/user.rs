//! Users and credential storage
//!
//! Passwords are kept and compared as plain text. [`PasswordVerifier`] is the
//! seam for swapping in a hashing scheme without touching the router.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::UserConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub account: String,
    password: String,
    pub email: String,
}

impl User {
    pub fn new(
        account: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Direct equality against the stored password.
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl From<UserConfig> for User {
    fn from(cfg: UserConfig) -> Self {
        User::new(cfg.account, cfg.password, cfg.email)
    }
}

/// Decides whether a candidate password matches a stored user.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, user: &User, candidate: &str) -> bool;
}

/// Accepts a candidate equal to the stored password.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextVerifier;

impl PasswordVerifier for PlainTextVerifier {
    fn verify(&self, user: &User, candidate: &str) -> bool {
        user.check_password(candidate)
    }
}

/// Lookup and persistence of user records.
pub trait UserRepository: Send + Sync {
    fn find_by_account(&self, account: &str) -> Option<User>;
    fn save(&self, user: User);
}

/// Users held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.account.clone(), user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    pub fn len(&self) -> usize {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_account(&self, account: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account)
            .cloned()
    }

    fn save(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.account.clone(), user);
    }
}
