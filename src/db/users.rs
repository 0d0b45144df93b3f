//! Process-wide user map for the demo auth flow.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, User};

pub const DEMO_EMAIL: &str = "demo@taskforge.local";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Demo User";

/// SHA-256 hex digest of a password.
pub fn hash_password(password: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Users keyed by email.
pub struct UserStore {
    users: DashMap<String, User>,
    last_id: AtomicI64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }

    /// A store seeded with the demo account.
    pub fn with_demo_user() -> Self {
        let store = Self::new();
        store.users.insert(
            DEMO_EMAIL.to_string(),
            User {
                id: "demo-1".to_string(),
                email: DEMO_EMAIL.to_string(),
                password_hash: hash_password(DEMO_PASSWORD),
                name: DEMO_NAME.to_string(),
                created_at: current_timestamp(),
            },
        );
        store
    }

    pub fn get(&self, email: &str) -> Option<User> {
        self.users.get(email).map(|u| u.value().clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Insert a new user; fails with `AlreadyExists` when the email is taken.
    pub fn insert(&self, email: &str, password: &str, name: &str) -> DbResult<User> {
        match self.users.entry(email.to_string()) {
            Entry::Occupied(_) => Err(DbError::AlreadyExists {
                entity_type: "User".to_string(),
                id: email.to_string(),
            }),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id(),
                    email: email.to_string(),
                    password_hash: hash_password(password),
                    name: name.to_string(),
                    created_at: current_timestamp(),
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    /// Millisecond-clock ids, bumped when two registrations share a tick.
    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1).to_string()
    }
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }
}
