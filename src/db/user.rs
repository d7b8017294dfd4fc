//! User model for clubboard.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Whether the account may open the admin dashboard and provision users.
    pub is_admin: bool,
    /// Account creation timestamp (UTC).
    pub created: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
}

impl NewUser {
    /// Create a new regular (non-admin) user.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            is_admin: false,
        }
    }

    /// Mark the user as an administrator.
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_admin() {
        let user = NewUser::new("alice", "hash");
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "hash");
        assert!(!user.is_admin);
    }

    #[test]
    fn test_new_user_admin() {
        assert!(NewUser::new("teacher", "hash").admin().is_admin);
    }
}
