//! In-memory record store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::user::{User, UserId};

/// Every user record, keyed by id, held for the lifetime of the process.
///
/// Cloning is cheap and every clone sees the same records. Reads share the
/// lock; writes take it exclusively, so concurrent requests never observe a
/// half-applied change.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `user` under its own id. Last write wins; the replaced record,
    /// if any, is returned.
    pub async fn insert(&self, user: User) -> Option<User> {
        self.users.write().await.insert(user.id, user)
    }

    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &UserId) -> Option<User> {
        self.users.write().await.remove(id)
    }

    /// A snapshot of every record.
    pub async fn all(&self) -> HashMap<UserId, User> {
        self.users.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
