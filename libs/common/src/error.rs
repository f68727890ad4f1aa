//! Persistence error taxonomy
//!
//! Every backing-store failure (PostgreSQL or Redis) is expressed as a
//! [`StoreError`]. The HTTP layer maps any `StoreError` to a generic
//! internal failure; the detail here is for logs only.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Failure of a backing persistence operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not reach or connect to the store
    #[error("store connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A query against PostgreSQL failed
    #[error("store query error: {0}")]
    Query(#[source] SqlxError),

    /// An operation against the Redis session store failed
    #[error("session store error: {0}")]
    Session(#[source] redis::RedisError),

    /// A stored value could not be (de)serialized
    #[error("stored value malformed: {0}")]
    Serialization(String),

    /// A secret could not be hashed into a storable credential
    #[error("credential hashing error: {0}")]
    Credential(String),

    /// Bad store configuration (URL, pool sizing)
    #[error("store configuration error: {0}")]
    Configuration(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Session(err)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_labelled_as_such() {
        let err = StoreError::Credential("argon2 parameter error".to_string());
        assert_eq!(
            err.to_string(),
            "credential hashing error: argon2 parameter error"
        );
    }

    #[test]
    fn serialization_failures_keep_their_own_label() {
        let err = StoreError::Serialization("truncated payload".to_string());
        assert_eq!(err.to_string(), "stored value malformed: truncated payload");
    }
}
