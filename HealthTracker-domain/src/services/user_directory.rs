//! In-memory directory of operator accounts
//!
//! Ids are allocated as one more than the highest id currently present, so
//! deleting the highest entry frees its id for the next add.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::entities::user::{DirectoryUser, UserFields};

/// Directory shared between request handlers
pub type SharedUserDirectory = Arc<RwLock<UserDirectory>>;

/// Ordered list of directory users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<DirectoryUser>,
}

impl Default for UserDirectory {
    /// Directory holding the two demo accounts
    fn default() -> Self {
        Self::with_users(vec![
            DirectoryUser {
                id: 1,
                username: "john123".to_string(),
                full_name: "John Doe".to_string(),
                gender: "Male".to_string(),
                email: "john@example.com".to_string(),
            },
            DirectoryUser {
                id: 2,
                username: "jane456".to_string(),
                full_name: "Jane Smith".to_string(),
                gender: "Female".to_string(),
                email: "jane@example.com".to_string(),
            },
        ])
    }
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Create a directory holding the given users, in order
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self { users }
    }

    /// Wrap this directory for sharing
    pub fn shared(self) -> SharedUserDirectory {
        Arc::new(RwLock::new(self))
    }

    /// Every user, in insertion order
    pub fn list(&self) -> &[DirectoryUser] {
        &self.users
    }

    pub fn get(&self, id: u32) -> Option<&DirectoryUser> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> u32 {
        self.users.iter().map(|user| user.id).max().unwrap_or(0) + 1
    }

    /// Append a user with a freshly allocated id
    pub fn add(&mut self, fields: UserFields) -> DirectoryUser {
        let user = fields.with_id(self.next_id());
        debug!("Adding directory user {} ({})", user.id, user.username);
        self.users.push(user.clone());
        user
    }

    /// Replace the fields of the user with `id`, keeping its position.
    /// Returns false when no such user exists.
    pub fn update(&mut self, id: u32, fields: UserFields) -> bool {
        match self.users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                *user = fields.with_id(id);
                true
            }
            None => false,
        }
    }

    /// Remove the user with `id`. Returns false when no such user exists.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }
}
