/// A registered principal.
///
/// Immutable once stored. The registry hands out clones, so callers can
/// never alter a stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    password_hash: String,
    role: String,
}

impl User {
    pub(crate) fn new(
        username: impl ToString,
        password_hash: impl ToString,
        role: impl ToString,
    ) -> Self {
        Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Argon2id PHC string. Only meaningful to `PasswordHasher::verify`.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}
