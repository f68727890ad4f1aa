//! Credential store: user identities and hashed secrets

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use common::error::{StoreError, StoreResult};
use sqlx::PgPool;
use tracing::info;

use crate::models::{NewUser, User};

/// Repository over the `users` table.
///
/// The plaintext secret is hashed before any statement runs; the store
/// never persists or logs it.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new identity.
    ///
    /// Returns `None` when the email is already taken. Uniqueness is
    /// enforced by the statement itself (`ON CONFLICT DO NOTHING`), so a
    /// concurrent signup with the same email cannot slip through.
    pub async fn create(&self, new_user: &NewUser) -> StoreResult<Option<User>> {
        info!("Creating identity for email: {}", new_user.email);

        let password_hash = hash_secret(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, profile_image, created_at)
            VALUES (gen_random_uuid(), $1, $2, $3, $4, now())
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, profile_image, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(&new_user.profile_image)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(user)
    }

    /// Find an identity by its email, compared exactly as stored.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, profile_image, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(user)
    }

    /// Verify a login secret against the stored credential.
    ///
    /// Goes through argon2's own verifier, which re-derives the hash and
    /// compares in constant effort. An unparseable stored hash counts as a
    /// failed verification rather than an error.
    pub fn verify_password(&self, user: &User, password: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&user.password_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

fn hash_secret(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Credential(format!("failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user_with_password(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: hash_secret(password).unwrap(),
            profile_image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = hash_secret("secret123").unwrap();
        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn hashing_salts_each_secret() {
        let first = hash_secret("secret123").unwrap();
        let second = hash_secret("secret123").unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn verify_accepts_the_right_secret() {
        let user = user_with_password("secret123");
        let repo = UserRepository {
            pool: PgPool::connect_lazy("postgresql://localhost/unused").unwrap(),
        };
        assert!(repo.verify_password(&user, "secret123"));
    }

    #[tokio::test]
    async fn verify_rejects_a_wrong_secret() {
        let user = user_with_password("secret123");
        let repo = UserRepository {
            pool: PgPool::connect_lazy("postgresql://localhost/unused").unwrap(),
        };
        assert!(!repo.verify_password(&user, "secret124"));
    }

    #[tokio::test]
    async fn verify_rejects_a_corrupted_stored_hash() {
        let mut user = user_with_password("secret123");
        user.password_hash = "not-a-phc-string".to_string();
        let repo = UserRepository {
            pool: PgPool::connect_lazy("postgresql://localhost/unused").unwrap(),
        };
        assert!(!repo.verify_password(&user, "secret123"));
    }
}
