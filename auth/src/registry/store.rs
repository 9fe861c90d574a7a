use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use super::errors::RegistryError;
use super::models::User;
use crate::password::PasswordHasher;

/// In-memory set of registered users, kept sorted by username.
///
/// Lookups are binary searches under a shared read lock, so any number of
/// request handlers can call [`UserRegistry::find`] concurrently. Inserts
/// shift later entries down one slot; the registry is small and written
/// mostly during startup.
pub struct UserRegistry {
    users: RwLock<Vec<User>>,
    password_hasher: PasswordHasher,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Register a new user.
    ///
    /// The password is hashed before the write lock is taken. Uniqueness is
    /// checked again under the lock, so a failed add never changes the set.
    ///
    /// # Arguments
    /// * `username` - Unique, case-sensitive username
    /// * `password` - Plaintext password (only its hash is stored)
    /// * `role` - Role label carried into issued tokens
    ///
    /// # Returns
    /// Copy of the stored user
    ///
    /// # Errors
    /// * `InvalidUsername` - Username is empty
    /// * `DuplicateUser` - Username is already registered
    /// * `Password` - Password hashing failed
    pub fn add(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<User, RegistryError> {
        if username.is_empty() {
            return Err(RegistryError::InvalidUsername);
        }

        if self.find(username).is_some() {
            return Err(RegistryError::DuplicateUser(username.to_string()));
        }

        let password_hash = self.password_hasher.hash(password)?;
        let user = User::new(username, password_hash, role);

        let mut users = self.write();
        match Self::position(&users, username) {
            Ok(_) => Err(RegistryError::DuplicateUser(username.to_string())),
            Err(index) => {
                users.insert(index, user.clone());
                Ok(user)
            }
        }
    }

    /// Look up a user by exact username.
    ///
    /// # Returns
    /// Copy of the stored user, or `None` if no such user is registered
    pub fn find(&self, username: &str) -> Option<User> {
        let users = self.read();
        Self::position(&users, username)
            .ok()
            .map(|index| users[index].clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of registered usernames in registry order.
    pub fn usernames(&self) -> Vec<String> {
        self.read()
            .iter()
            .map(|user| user.username().to_string())
            .collect()
    }

    fn position(users: &[User], username: &str) -> Result<usize, usize> {
        users.binary_search_by(|user| user.username().cmp(username))
    }

    // Poisoning is ignored: `insert` is the only mutation and runs after all
    // fallible work.
    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
