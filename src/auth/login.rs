//! Credential checks for the login form.

use std::future::Future;
use std::sync::LazyLock;

use tracing::{debug, info};

use crate::auth::{hash_password, verify_password_blocking, PasswordError};
use crate::db::{DbPool, User, UserRepository};
use crate::{BoardError, Result};

/// Hash checked when the username is unknown, so that path costs one
/// Argon2 verification like a wrong code does.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("0000").unwrap_or_default());

/// Check a username and account code.
///
/// Unknown users and wrong codes both yield `Ok(None)` after the same
/// amount of hashing work.
pub async fn authenticate(pool: &DbPool, username: &str, password: &str) -> Result<Option<User>> {
    authenticate_with(pool, username, password, verify_password_blocking).await
}

async fn authenticate_with<F, Fut>(
    pool: &DbPool,
    username: &str,
    password: &str,
    verify: F,
) -> Result<Option<User>>
where
    F: Fn(String, String) -> Fut,
    Fut: Future<Output = std::result::Result<(), PasswordError>>,
{
    let repo = UserRepository::new(pool);
    let user = repo.get_by_username(username).await?;

    let hash = match &user {
        Some(user) => user.password_hash.clone(),
        None => DUMMY_HASH.as_str().to_owned(),
    };
    let outcome = verify(password.to_string(), hash).await;

    match (user, outcome) {
        (_, Err(PasswordError::HashError(e))) => Err(BoardError::Auth(e)),
        (None, _) => {
            debug!(username = %username, "Login failed: unknown user");
            Ok(None)
        }
        (Some(_), Err(e)) => {
            debug!(username = %username, error = %e, "Login failed: password mismatch");
            Ok(None)
        }
        (Some(user), Ok(())) => {
            info!(user_id = user.id, username = %user.username, "User logged in");
            Ok(Some(user))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::auth::{ensure_admin, register, RegistrationRequest};
    use crate::Database;

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), &RegistrationRequest::new("alice", "1234"))
            .await
            .unwrap();

        let user = authenticate(db.pool(), "alice", "1234").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn test_authenticate_admin_flag() {
        let db = Database::open_in_memory().await.unwrap();
        ensure_admin(db.pool(), "teacher", "9999").await.unwrap();

        let user = authenticate(db.pool(), "teacher", "9999").await.unwrap().unwrap();
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let db = Database::open_in_memory().await.unwrap();
        register(db.pool(), &RegistrationRequest::new("alice", "1234"))
            .await
            .unwrap();

        assert!(authenticate(db.pool(), "alice", "4321").await.unwrap().is_none());
        assert!(authenticate(db.pool(), "mallory", "1234").await.unwrap().is_none());
        assert!(authenticate(db.pool(), "", "").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_code_both_verify() {
        let db = Database::open_in_memory().await.unwrap();
        let alice = register(db.pool(), &RegistrationRequest::new("alice", "1234"))
            .await
            .unwrap();

        let checked: Arc<Mutex<Vec<String>>> = Arc::default();
        let recorder = {
            let checked = checked.clone();
            move |password: String, hash: String| {
                checked.lock().unwrap().push(hash.clone());
                verify_password_blocking(password, hash)
            }
        };

        let unknown = authenticate_with(db.pool(), "mallory", "1234", &recorder)
            .await
            .unwrap();
        assert!(unknown.is_none());

        let wrong = authenticate_with(db.pool(), "alice", "4321", &recorder)
            .await
            .unwrap();
        assert!(wrong.is_none());

        let checked = checked.lock().unwrap();
        assert_eq!(checked.len(), 2);
        assert!(checked[0].starts_with("$argon2id$"));
        assert_eq!(checked[1], alice.password_hash);
    }

    #[tokio::test]
    async fn test_dummy_code_does_not_admit_unknown_user() {
        let db = Database::open_in_memory().await.unwrap();

        assert!(authenticate(db.pool(), "ghost", "0000").await.unwrap().is_none());
    }
}
