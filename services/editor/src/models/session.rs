//! Session snapshot model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// Identity snapshot bound to a session at login time.
///
/// This is a copy of the identity's public fields, not a live reference:
/// a session keeps the view of the user it was created with for its whole
/// lifetime. Stored as JSON in the Redis session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        SessionUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}
