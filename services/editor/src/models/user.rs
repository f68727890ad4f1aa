//! User identity model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User identity entity.
///
/// The `password_hash` is an argon2 PHC string; it never leaves the service
/// in any response. Identities are immutable after signup.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Signup payload, carrying the plaintext secret only as far as the
/// credential store, which hashes it before persisting anything.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

impl User {
    /// Public projection of an identity: everything except the credential.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Identity summary returned from signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}
